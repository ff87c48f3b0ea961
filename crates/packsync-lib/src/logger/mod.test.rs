use super::*;

#[test]
fn test_filter_directives_scope_http_crates_to_warn() {
    let directives = filter_directives(LogLevel::Debug);
    assert!(directives.starts_with("packsync=debug,packsync_lib=debug"));
    assert!(directives.contains("reqwest=warn"));
    assert!(directives.contains("hyper_util=warn"));
    assert!(directives.ends_with(",debug"));
}

#[test]
fn test_filter_directives_parse() {
    for level in [LogLevel::Error, LogLevel::Info, LogLevel::Trace] {
        let directives = filter_directives(level);
        assert!(EnvFilter::try_new(&directives).is_ok(), "{directives}");
    }
}

#[test]
fn test_global_accessors_agree() {
    assert_eq!(Logger::is_initialized(), Logger::global().is_some());
}

#[test]
fn test_log_macros_fall_back_without_logger() {
    // Must not panic when no global logger has been installed
    crate::log_info!("reconcile started");
    crate::log_error!("reconcile failed", LogContext::new("reconcile"));
    crate::log_warn!("disable failed");
    crate::log_debug!("entry skipped", LogContext::with_progress("reconcile", 2));
}
