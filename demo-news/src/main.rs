mod server;

use owned_content_axum::Stores;

use crate::server::{ServerConfig, init_tracing, spawn_http_server, spawn_https_server};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Create the tables and add sample news to an empty database.
async fn prepare(stores: &Stores) -> Result<(), BoxError> {
    owned_content_axum::init(stores).await?;
    let seeded = demo_news::seed_news(stores).await?;
    tracing::info!("Seeded {} news", seeded);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Install default CryptoProvider for rustls
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        return Err("Failed to install default CryptoProvider".into());
    }

    dotenvy::dotenv().ok();
    init_tracing("demo_news");

    let stores = Stores::from_env().await?;
    prepare(&stores).await?;

    let app = demo_news::app(stores);
    let config = ServerConfig::from_env();

    match config.tls {
        Some((cert, key)) => {
            spawn_https_server(config.port, app, &cert, &key)
                .await?
                .await??;
        }
        None => {
            spawn_http_server(config.port, app).await??;
        }
    }
    Ok(())
}
