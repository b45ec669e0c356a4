//! Conversion Webhook
//!
//! Serves CRD conversion for the `infrastructure.cluster.x-k8s.io` resources
//! (OpenStackCluster, OpenStackClusterTemplate, OpenStackMachine,
//! OpenStackMachineTemplate) between v1alpha5, v1alpha6, v1beta1 and v1beta2.

mod config;
mod error;
mod metrics;
mod server;
mod webhook;

use anyhow::Context;
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::WebhookConfig;
use crate::metrics::Metrics;
use crate::server::{ReadinessState, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting conversion webhook");

    let config = WebhookConfig::from_env()?;
    let metrics = Metrics::new()?;
    let readiness = ReadinessState::new();
    let app = build_router(readiness.clone(), metrics);

    info!("Configuration:");
    info!("  Bind address: {}", config.bind_address);
    info!("  TLS: {}", if config.tls.is_some() { "enabled" } else { "disabled" });

    match config.tls {
        Some(tls) => {
            if rustls::crypto::ring::default_provider().install_default().is_err() {
                warn!("A rustls crypto provider was already installed");
            }
            let tls_config = RustlsConfig::from_pem_file(&tls.cert_file, &tls.key_file)
                .await
                .with_context(|| {
                    format!("Failed to load TLS certificate {}", tls.cert_file.display())
                })?;

            readiness.set_ready();
            info!(address = %config.bind_address, "Conversion webhook listening (HTTPS)");
            axum_server::bind_rustls(config.bind_address, tls_config)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            warn!(
                "No TLS certificate configured; serving plain HTTP, which the API server will \
                 not call directly"
            );
            let listener = TcpListener::bind(config.bind_address).await?;

            readiness.set_ready();
            info!(address = %config.bind_address, "Conversion webhook listening (HTTP)");
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
