//! Prints the multi-version CRDs as a YAML stream.
//!
//! The webhook Service can be overridden with `WEBHOOK_SERVICE_NAME`,
//! `WEBHOOK_SERVICE_NAMESPACE` and `WEBHOOK_SERVICE_PORT`.

use anyhow::{Context, Result};
use crds::{WebhookService, all_crds};

fn service_from_env() -> Result<WebhookService> {
    let mut service = WebhookService::default();
    if let Ok(name) = std::env::var("WEBHOOK_SERVICE_NAME") {
        service.name = name;
    }
    if let Ok(namespace) = std::env::var("WEBHOOK_SERVICE_NAMESPACE") {
        service.namespace = namespace;
    }
    if let Ok(port) = std::env::var("WEBHOOK_SERVICE_PORT") {
        service.port = port
            .parse()
            .with_context(|| format!("WEBHOOK_SERVICE_PORT is not a port number: {port}"))?;
    }
    Ok(service)
}

fn main() -> Result<()> {
    let service = service_from_env()?;
    let crds = all_crds(&service).context("Failed to merge CRD versions")?;

    let documents = crds
        .iter()
        .map(serde_yaml::to_string)
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to serialize CRD")?;
    print!("{}", documents.join("---\n"));
    Ok(())
}
