use super::ui;
use crate::config::AppConfig;
use crate::core::dataset::{
    DatasetKind, DatasetProvider, IndicatorSet, TariffData, TaxPolicyData,
};
use crate::core::market::{self, MarketComparison};
use anyhow::Result;
use futures::future::join_all;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

const UPDATES_SHOWN: usize = 6;

/// Fetches all datasets concurrently and fans them out into independently
/// rendered sections. A failed dataset degrades to a placeholder line.
pub async fn run(provider: &dyn DatasetProvider, config: &AppConfig) -> Result<()> {
    let pb = ui::new_progress_bar(DatasetKind::ALL.len() as u64, true);
    pb.set_message("Loading datasets...");

    let fetches = DatasetKind::ALL.map(|kind| {
        let pb = pb.clone();
        async move {
            let result = provider.fetch(kind).await;
            pb.inc(1);
            (kind, result)
        }
    });
    let mut results: HashMap<DatasetKind, Result<Value>> =
        join_all(fetches).await.into_iter().collect();
    pb.finish_and_clear();

    render_market(results.remove(&DatasetKind::Market), config);
    ui::print_separator();
    render_tariffs(results.remove(&DatasetKind::Tariffs));
    ui::print_separator();
    render_taxes(results.remove(&DatasetKind::TaxBills));
    ui::print_separator();
    render_indicators(results.remove(&DatasetKind::Indicators));

    Ok(())
}

fn parse_section<T: serde::de::DeserializeOwned>(
    result: Option<Result<Value>>,
    section: &str,
) -> Option<T> {
    match result? {
        Ok(value) => match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!("Malformed {} dataset: {}", section, e);
                None
            }
        },
        Err(e) => {
            debug!("Failed to load {} dataset: {}", section, e);
            None
        }
    }
}

fn render_market(result: Option<Result<Value>>, config: &AppConfig) {
    match parse_section::<MarketComparison>(result, "market") {
        Some(comparison) => {
            let window_days = market::resolve_window_days(config.window_days, &comparison);
            let terms = market::align_terms(&comparison, window_days);
            super::market::render(&terms, window_days);
        }
        None => println!("{}", ui::section_placeholder("Market comparison")),
    }
}

fn render_tariffs(result: Option<Result<Value>>) {
    match parse_section::<TariffData>(result, "tariff") {
        Some(data) => super::tariffs::render(&data.normalized(), Some(UPDATES_SHOWN)),
        None => println!("{}", ui::section_placeholder("Tariffs")),
    }
}

fn render_taxes(result: Option<Result<Value>>) {
    match parse_section::<TaxPolicyData>(result, "tax-policy") {
        Some(data) => super::taxes::render(&data),
        None => println!("{}", ui::section_placeholder("Tax bills")),
    }
}

fn render_indicators(result: Option<Result<Value>>) {
    match parse_section::<IndicatorSet>(result, "indicators") {
        Some(set) => super::indicators::render(&set),
        None => println!("{}", ui::section_placeholder("Indicators")),
    }
}
