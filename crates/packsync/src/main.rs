#[tokio::main]
async fn main() -> anyhow::Result<()> {
    packsync_lib::main().await
}
