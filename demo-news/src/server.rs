use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use tokio::task::JoinHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Listening port and optional TLS material, from `PORT`, `TLS_CERT_PATH`
/// and `TLS_KEY_PATH`.
pub(crate) struct ServerConfig {
    pub(crate) port: u16,
    pub(crate) tls: Option<(String, String)>,
}

impl ServerConfig {
    pub(crate) fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3001);
        let tls = match (
            std::env::var("TLS_CERT_PATH"),
            std::env::var("TLS_KEY_PATH"),
        ) {
            (Ok(cert), Ok(key)) => Some((cert, key)),
            _ => None,
        };
        Self { port, tls }
    }
}

pub(crate) fn spawn_http_server(port: u16, app: Router) -> JoinHandle<std::io::Result<()>> {
    tokio::spawn(async move {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        tracing::info!("HTTP server listening on {}", addr);
        axum_server::bind(addr).serve(app.into_make_service()).await
    })
}

pub(crate) async fn spawn_https_server(
    port: u16,
    app: Router,
    cert: &str,
    key: &str,
) -> std::io::Result<JoinHandle<std::io::Result<()>>> {
    let config = RustlsConfig::from_pem_file(cert, key).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("HTTPS server listening on {}", addr);
    Ok(tokio::spawn(async move {
        axum_server::bind_rustls(addr, config)
            .serve(app.into_make_service())
            .await
    }))
}

pub(crate) fn init_tracing(app_name: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        #[cfg(debug_assertions)]
        {
            format!(
                "owned_content_axum=trace,owned_content=trace,{}=trace,tower_http=debug,info",
                app_name
            )
            .into()
        }

        #[cfg(not(debug_assertions))]
        {
            "info".into()
        }
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    #[cfg(debug_assertions)]
    tracing::info!("Debug mode enabled - showing detailed logs by default");
    tracing::info!("You can increase verbosity by setting the RUST_LOG environment variable.");
}
