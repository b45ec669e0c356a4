//! HTTP surface: conversion, health checks and metrics
//!
//! - `POST /convert` - ConversionReview webhook
//! - `GET /healthz` - liveness
//! - `GET /readyz` - readiness, once the listener is bound
//! - `GET /metrics` - Prometheus text format

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::metrics::Metrics;
use crate::webhook::handle_convert;

/// Readiness flag shared between `main` and the `/readyz` handler
#[derive(Debug, Clone, Default)]
pub struct ReadinessState {
    ready: Arc<AtomicBool>,
}

impl ReadinessState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ready(&self) {
        self.ready.store(true, Ordering::SeqCst);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
pub struct ServerState {
    readiness: ReadinessState,
    metrics: Metrics,
}

impl ServerState {
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn readyz(State(state): State<ServerState>) -> StatusCode {
    if state.readiness.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn metrics_handler(State(state): State<ServerState>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [(CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {e}"),
        )
            .into_response(),
    }
}

pub fn build_router(readiness: ReadinessState, metrics: Metrics) -> Router {
    Router::new()
        .route("/convert", post(handle_convert))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(ServerState { readiness, metrics })
}

#[cfg(test)]
#[path = "server_test.rs"]
mod tests;
