use crm_server::utils::init_logger;
use crm_server::{Config, Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    init_logger(&config.log_level, config.log_json, config.log_dir.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {e}"))?;

    tracing::info!(
        environment = %config.environment,
        database = %config.database_url,
        "Starting travel CRM server"
    );

    Server::new(config)
        .run()
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}
