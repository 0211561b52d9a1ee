//! Market-series normalization: aligns each president's daily S&P 500 series
//! to a common day window from inauguration and derives percent-change series
//! and performance metrics from the windowed quotes.

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Start of the reference term all other terms are aligned against.
pub fn reference_inauguration() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketComparison {
    #[serde(default)]
    pub metadata: MarketMetadata,
    #[serde(default)]
    pub presidential_data: HashMap<String, PresidentTerm>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketMetadata {
    #[serde(default)]
    pub reference_inauguration: Option<String>,
    #[serde(default)]
    pub comparison_period_days: Option<i64>,
    #[serde(default)]
    pub data_source: Option<String>,
    #[serde(default)]
    pub collection_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PresidentTerm {
    #[serde(default)]
    pub president: String,
    #[serde(default)]
    pub metadata: Option<TermMetadata>,
    #[serde(default)]
    pub period: Option<TermPeriod>,
    #[serde(default)]
    pub performance: Option<PerformanceMetrics>,
    #[serde(default, deserialize_with = "lenient_quotes")]
    pub daily_data: Vec<DailyQuote>,
}

impl PresidentTerm {
    /// Inauguration date, from term metadata if it parses, else the stated
    /// period start, else the first quote on record.
    pub fn inauguration_date(&self) -> Option<NaiveDate> {
        self.metadata
            .as_ref()
            .and_then(|m| m.inauguration.as_deref())
            .and_then(parse_date_prefix)
            .or_else(|| self.period.as_ref().and_then(|p| p.start_date))
            .or_else(|| self.daily_data.first().map(|q| q.date))
    }
}

/// Date part of an ISO datetime string ("1977-01-20T00:00:00").
fn parse_date_prefix(s: &str) -> Option<NaiveDate> {
    s.get(..10).and_then(|d| d.parse().ok())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TermMetadata {
    #[serde(default)]
    pub party: Option<String>,
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub inauguration: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TermPeriod {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub duration_days: Option<i64>,
    #[serde(default)]
    pub trading_days: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyQuote {
    pub date: NaiveDate,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default)]
    pub volume: Option<u64>,
    #[serde(default)]
    pub change_pct: Option<f64>,
}

impl DailyQuote {
    /// Intraday change, from the source field or recomputed from open/close.
    fn daily_return(&self) -> Option<f64> {
        self.change_pct.or_else(|| match (self.open, self.close) {
            (Some(open), Some(close)) if open > 0.0 => Some(((close - open) / open) * 100.0),
            _ => None,
        })
    }
}

/// Drops malformed daily records (unparseable dates, wrong shapes) instead of
/// failing the whole dataset.
fn lenient_quotes<'de, D>(deserializer: D) -> Result<Vec<DailyQuote>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Vec::<Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceMetrics {
    pub start_price: f64,
    pub end_price: f64,
    pub total_return_pct: f64,
    pub annualized_return_pct: f64,
    pub volatility_pct: f64,
    pub max_drawdown_pct: f64,
    pub best_day_pct: f64,
    pub worst_day_pct: f64,
    pub avg_daily_return_pct: f64,
    pub trading_days: usize,
}

/// One point of a percent-change series, relative to the window's first close.
#[derive(Debug, Clone, Serialize)]
pub struct ChangePoint {
    pub day: i64,
    pub date: NaiveDate,
    pub close: f64,
    pub change_pct: f64,
}

/// A president's series after alignment to the common window, ranked by the
/// dashboard against the other terms.
#[derive(Debug, Clone, Serialize)]
pub struct AlignedTerm {
    pub president: String,
    pub party: Option<String>,
    pub term: Option<String>,
    pub inauguration: Option<NaiveDate>,
    pub series: Vec<ChangePoint>,
    pub performance: Option<PerformanceMetrics>,
}

/// Quotes falling inside `[start, start + days]`, oldest first.
pub fn window(quotes: &[DailyQuote], start: NaiveDate, days: i64) -> Vec<DailyQuote> {
    let end = start + Duration::days(days);
    let mut windowed: Vec<DailyQuote> = quotes
        .iter()
        .filter(|q| q.date >= start && q.date <= end)
        .cloned()
        .collect();
    windowed.sort_by_key(|q| q.date);
    windowed
}

/// Percent change of each close against the first positive close in the
/// window. Quotes without a usable close are skipped; an empty input yields
/// an empty series.
pub fn change_series(quotes: &[DailyQuote]) -> Vec<ChangePoint> {
    let mut closes = quotes
        .iter()
        .filter_map(|q| q.close.map(|c| (q.date, c)))
        .filter(|(_, c)| *c > 0.0);

    let Some((start_date, start_close)) = closes.next() else {
        return Vec::new();
    };

    let mut points = vec![ChangePoint {
        day: 0,
        date: start_date,
        close: start_close,
        change_pct: 0.0,
    }];
    for (date, close) in closes {
        points.push(ChangePoint {
            day: (date - start_date).num_days(),
            date,
            close,
            change_pct: ((close - start_close) / start_close) * 100.0,
        });
    }
    points
}

/// Performance metrics over a windowed series. `duration_days` is the
/// calendar length of the window, used for annualization.
pub fn compute_performance(quotes: &[DailyQuote], duration_days: i64) -> Option<PerformanceMetrics> {
    let closes: Vec<f64> = quotes
        .iter()
        .filter_map(|q| q.close)
        .filter(|c| *c > 0.0)
        .collect();
    let (&start_price, &end_price) = (closes.first()?, closes.last()?);

    let total_return_pct = ((end_price - start_price) / start_price) * 100.0;
    let years = duration_days as f64 / 365.25;
    let annualized_return_pct = if years > 0.0 {
        ((end_price / start_price).powf(1.0 / years) - 1.0) * 100.0
    } else {
        0.0
    };

    let daily_returns: Vec<f64> = quotes.iter().filter_map(|q| q.daily_return()).collect();
    let (avg_daily_return_pct, volatility_pct, best_day_pct, worst_day_pct) =
        if daily_returns.is_empty() {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let avg = daily_returns.iter().sum::<f64>() / daily_returns.len() as f64;
            let variance = daily_returns
                .iter()
                .map(|r| (r - avg) * (r - avg))
                .sum::<f64>()
                / daily_returns.len() as f64;
            // Annualized over 252 trading days
            let volatility = variance.sqrt() * (252.0_f64).sqrt();
            let best = daily_returns.iter().cloned().fold(f64::MIN, f64::max);
            let worst = daily_returns.iter().cloned().fold(f64::MAX, f64::min);
            (avg, volatility, best, worst)
        };

    let mut peak = start_price;
    let mut max_drawdown_pct = 0.0;
    for close in &closes {
        if *close > peak {
            peak = *close;
        }
        let drawdown = ((peak - close) / peak) * 100.0;
        if drawdown > max_drawdown_pct {
            max_drawdown_pct = drawdown;
        }
    }

    Some(PerformanceMetrics {
        start_price,
        end_price,
        total_return_pct,
        annualized_return_pct,
        volatility_pct,
        max_drawdown_pct,
        best_day_pct,
        worst_day_pct,
        avg_daily_return_pct,
        trading_days: closes.len(),
    })
}

/// Window length to align terms over: an explicit config override wins, then
/// the window the dataset was collected for, then days elapsed since the
/// reference inauguration.
pub fn resolve_window_days(configured: Option<i64>, comparison: &MarketComparison) -> i64 {
    configured
        .or(comparison.metadata.comparison_period_days)
        .unwrap_or_else(|| {
            (Utc::now().date_naive() - reference_inauguration())
                .num_days()
                .max(1)
        })
}

/// Aligns every term to the common window and ranks them by total return,
/// best first. Terms without usable data sort last with an empty series.
pub fn align_terms(comparison: &MarketComparison, window_days: i64) -> Vec<AlignedTerm> {
    let mut terms: Vec<AlignedTerm> = comparison
        .presidential_data
        .iter()
        .map(|(name, term)| {
            let inauguration = term.inauguration_date();
            let windowed = inauguration
                .map(|start| window(&term.daily_data, start, window_days))
                .unwrap_or_default();
            let performance = term
                .performance
                .clone()
                .or_else(|| compute_performance(&windowed, window_days));

            AlignedTerm {
                president: if term.president.is_empty() {
                    name.clone()
                } else {
                    term.president.clone()
                },
                party: term.metadata.as_ref().and_then(|m| m.party.clone()),
                term: term.metadata.as_ref().and_then(|m| m.term.clone()),
                inauguration,
                series: change_series(&windowed),
                performance,
            }
        })
        .collect();

    terms.sort_by(|a, b| {
        let ka = a.performance.as_ref().map(|p| p.total_return_pct);
        let kb = b.performance.as_ref().map(|p| p.total_return_pct);
        kb.partial_cmp(&ka).unwrap_or(Ordering::Equal)
    });
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(date: &str, close: f64) -> DailyQuote {
        DailyQuote {
            date: date.parse().unwrap(),
            open: Some(close),
            high: None,
            low: None,
            close: Some(close),
            volume: None,
            change_pct: None,
        }
    }

    #[test]
    fn test_window_selects_exact_day_range() {
        let quotes = vec![
            quote("2021-01-19", 100.0), // day before inauguration
            quote("2021-01-20", 101.0),
            quote("2021-01-25", 103.0),
            quote("2021-01-30", 104.0), // exactly day 10
            quote("2021-01-31", 105.0), // day 11, outside
        ];
        let start = "2021-01-20".parse().unwrap();

        let windowed = window(&quotes, start, 10);
        assert_eq!(windowed.len(), 3);
        assert_eq!(windowed.first().unwrap().date.to_string(), "2021-01-20");
        assert_eq!(windowed.last().unwrap().date.to_string(), "2021-01-30");
    }

    #[test]
    fn test_window_sorts_unordered_input() {
        let quotes = vec![
            quote("2021-01-25", 103.0),
            quote("2021-01-20", 101.0),
            quote("2021-01-22", 102.0),
        ];
        let windowed = window(&quotes, "2021-01-20".parse().unwrap(), 30);
        let dates: Vec<String> = windowed.iter().map(|q| q.date.to_string()).collect();
        assert_eq!(dates, vec!["2021-01-20", "2021-01-22", "2021-01-25"]);
    }

    #[test]
    fn test_change_series_baselines_on_first_close() {
        let quotes = vec![
            quote("2021-01-20", 200.0),
            quote("2021-01-21", 210.0),
            quote("2021-01-25", 190.0),
        ];

        let series = change_series(&quotes);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].day, 0);
        assert_eq!(series[0].change_pct, 0.0);
        assert_eq!(series[1].day, 1);
        assert!((series[1].change_pct - 5.0).abs() < 1e-9);
        assert_eq!(series[2].day, 5);
        assert!((series[2].change_pct - -5.0).abs() < 1e-9);
    }

    #[test]
    fn test_change_series_skips_unusable_closes() {
        let mut bad = quote("2021-01-20", 0.0);
        bad.close = Some(0.0);
        let mut missing = quote("2021-01-21", 0.0);
        missing.close = None;
        let quotes = vec![bad, missing, quote("2021-01-22", 150.0)];

        let series = change_series(&quotes);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].close, 150.0);
        assert!(change_series(&[]).is_empty());
    }

    #[test]
    fn test_compute_performance() {
        let quotes = vec![
            quote("2021-01-20", 100.0),
            quote("2021-01-21", 120.0),
            quote("2021-01-22", 90.0),
            quote("2021-01-25", 110.0),
        ];

        let perf = compute_performance(&quotes, 365).unwrap();
        assert_eq!(perf.start_price, 100.0);
        assert_eq!(perf.end_price, 110.0);
        assert!((perf.total_return_pct - 10.0).abs() < 1e-9);
        // peak 120 -> trough 90
        assert!((perf.max_drawdown_pct - 25.0).abs() < 1e-9);
        assert_eq!(perf.trading_days, 4);
        assert!(compute_performance(&[], 365).is_none());
    }

    #[test]
    fn test_lenient_daily_data_drops_bad_dates() {
        let json = r#"{
            "president": "Test",
            "daily_data": [
                {"date": "2021-01-20", "close": 100.0},
                {"date": "not-a-date", "close": 101.0},
                {"date": "2021-01-21", "close": 102.0}
            ]
        }"#;

        let term: PresidentTerm = serde_json::from_str(json).unwrap();
        assert_eq!(term.daily_data.len(), 2);
    }

    #[test]
    fn test_align_terms_ranks_by_total_return() {
        let json = r#"{
            "metadata": {"comparison_period_days": 100},
            "presidential_data": {
                "Laggard": {
                    "president": "Laggard",
                    "metadata": {"party": "Democrat", "inauguration": "2021-01-20T00:00:00"},
                    "daily_data": [
                        {"date": "2021-01-20", "close": 100.0},
                        {"date": "2021-02-20", "close": 95.0}
                    ]
                },
                "Leader": {
                    "president": "Leader",
                    "metadata": {"party": "Republican", "inauguration": "2017-01-20T00:00:00"},
                    "daily_data": [
                        {"date": "2017-01-20", "close": 100.0},
                        {"date": "2017-02-20", "close": 112.0}
                    ]
                },
                "NoData": {"president": "NoData"}
            }
        }"#;

        let comparison: MarketComparison = serde_json::from_str(json).unwrap();
        let days = resolve_window_days(None, &comparison);
        assert_eq!(days, 100);

        let terms = align_terms(&comparison, days);
        assert_eq!(terms.len(), 3);
        assert_eq!(terms[0].president, "Leader");
        assert_eq!(terms[1].president, "Laggard");
        assert_eq!(terms[2].president, "NoData");
        assert!(terms[2].series.is_empty());
        assert!(terms[2].performance.is_none());

        // Series are day-offset aligned even though calendar dates differ
        assert_eq!(terms[0].series.last().unwrap().day, 31);
        assert_eq!(terms[1].series.last().unwrap().day, 31);
    }

    #[test]
    fn test_align_terms_trusts_source_metrics() {
        let json = r#"{
            "presidential_data": {
                "Precomputed": {
                    "president": "Precomputed",
                    "performance": {"total_return_pct": 42.0, "trading_days": 250},
                    "daily_data": [{"date": "2009-01-20", "close": 800.0}]
                }
            }
        }"#;

        let comparison: MarketComparison = serde_json::from_str(json).unwrap();
        let terms = align_terms(&comparison, 365);
        let perf = terms[0].performance.as_ref().unwrap();
        assert_eq!(perf.total_return_pct, 42.0);
        assert_eq!(perf.trading_days, 250);
    }

    #[test]
    fn test_resolve_window_days_precedence() {
        let comparison: MarketComparison =
            serde_json::from_str(r#"{"metadata": {"comparison_period_days": 200}}"#).unwrap();
        assert_eq!(resolve_window_days(Some(30), &comparison), 30);
        assert_eq!(resolve_window_days(None, &comparison), 200);

        let empty = MarketComparison::default();
        assert!(resolve_window_days(None, &empty) >= 1);
    }
}
