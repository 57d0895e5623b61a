#[tokio::main]
async fn main() -> anyhow::Result<()> {
    healthcheck_lib::run().await
}
