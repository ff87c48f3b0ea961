pub mod fixtures;
pub mod test_env;

pub use fixtures::{override_file, plan_from_json};
pub use test_env::TestEnvironment;
