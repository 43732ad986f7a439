use reef_server::{Config, Server, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    setup_environment();

    tracing::info!("Récif storefront server starting...");

    // 2. Configuration
    let config = Config::from_env();

    // 3. Serve until shutdown
    let server = Server::new(config);
    server.run().await?;

    Ok(())
}
