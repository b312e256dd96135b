#[tokio::main]
async fn main() -> anyhow::Result<()> {
    revscope_server::start().await
}
