mod server;

use owned_content_axum::Stores;

use crate::server::{ServerConfig, init_tracing, spawn_http_server, spawn_https_server};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

async fn prepare(stores: &Stores) -> Result<(), BoxError> {
    owned_content_axum::init(stores).await?;
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
    init_tracing("demo_notes");

    let stores = Stores::from_env().await?;
    prepare(&stores).await?;

    let app = demo_notes::app(stores);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_prepare_creates_tables() {
        let stores = Stores::in_memory().await.unwrap();

        prepare(&stores).await.unwrap();
        // Running twice is fine
        prepare(&stores).await.unwrap();

        let notes = owned_content::list_notes(&stores, &owned_content::Identity::user("nobody"))
            .await
            .unwrap();
        assert!(notes.is_empty());
    }
}
