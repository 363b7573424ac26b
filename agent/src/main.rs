use agent::config::Config;
use agent::{logger, maintainer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_tracing()?;

    let config = Config::from_env()?;
    tracing::info!(
        server = %config.server_address,
        backend = %config.backend_address,
        conn_count = config.conn_count,
        "starting pool maintainer"
    );

    maintainer::run(config).await
}
