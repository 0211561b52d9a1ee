//! HTTP surface: the merged dashboard envelope, the normalized market
//! comparison, and a liveness probe.

use anyhow::{Context, Result};
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::core::dataset::{DatasetKind, DatasetProvider, TariffData};
use crate::core::market::{self, AlignedTerm, MarketComparison};
use crate::{AppProvider, build_provider};

pub struct AppState {
    provider: AppProvider,
    window_days: Option<i64>,
}

/// The three merged datasets the dashboard page consumes in one request.
#[derive(Serialize)]
struct DashboardEnvelope {
    indicators: Value,
    tariffs: TariffData,
    tax_bills: Value,
}

#[derive(Serialize)]
struct MarketView {
    window_days: i64,
    terms: Vec<AlignedTerm>,
}

/// Any read failure collapses to a generic 500; the body carries no detail.
async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardEnvelope>, StatusCode> {
    let (indicators, tariffs, tax_bills) = tokio::try_join!(
        state.provider.fetch(DatasetKind::Indicators),
        state.provider.fetch(DatasetKind::Tariffs),
        state.provider.fetch(DatasetKind::TaxBills),
    )
    .map_err(|e| {
        error!("Dashboard envelope fetch failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let tariffs: TariffData = serde_json::from_value(tariffs).map_err(|e| {
        error!("Malformed tariff dataset: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(DashboardEnvelope {
        indicators,
        tariffs: tariffs.normalized(),
        tax_bills,
    }))
}

async fn market_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MarketView>, StatusCode> {
    let value = state
        .provider
        .fetch(DatasetKind::Market)
        .await
        .map_err(|e| {
            error!("Market dataset fetch failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    let comparison: MarketComparison = serde_json::from_value(value).map_err(|e| {
        error!("Malformed market dataset: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let window_days = market::resolve_window_days(state.window_days, &comparison);
    Ok(Json(MarketView {
        window_days,
        terms: market::align_terms(&comparison, window_days),
    }))
}

async fn healthz_handler() -> &'static str {
    "ok"
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz_handler))
        .route("/api/dashboard", get(dashboard_handler))
        .route("/api/market", get(market_handler))
        .with_state(state)
}

pub async fn run(config_path: Option<&str>, port: u16) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };

    let state = Arc::new(AppState {
        provider: build_provider(&config),
        window_days: config.window_days,
    });

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Serving dashboard API on {addr}");

    axum::serve(listener, build_router(state))
        .await
        .context("Server failed")
}
