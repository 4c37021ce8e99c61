use imposter::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ImposterError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;
    let server = ImposterServer::builder().config(config).build().await?;

    tracing::info!(addr = %server.local_addr()?, "imposter server listening");
    server.run().await
}
