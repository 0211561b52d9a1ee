//! Dataset identities, the provider abstraction, and the tolerant record types
//! for the non-market datasets.
//!
//! All datasets are externally produced JSON documents. Beyond the identifying
//! field, every field is optional or defaulted so that a missing key degrades
//! at render time instead of failing the parse.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;
use std::str::FromStr;

/// The datasets the dashboard consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum DatasetKind {
    Indicators,
    Tariffs,
    TaxBills,
    Market,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 4] = [
        DatasetKind::Indicators,
        DatasetKind::Tariffs,
        DatasetKind::TaxBills,
        DatasetKind::Market,
    ];

    /// File name under the data directory (and remote `/data/` path).
    pub fn file_name(&self) -> &'static str {
        match self {
            DatasetKind::Indicators => "economic_indicators.json",
            DatasetKind::Tariffs => "tariff_data_clean.json",
            DatasetKind::TaxBills => "tax_policy_bills.json",
            DatasetKind::Market => "presidential_sp500_comparison.json",
        }
    }
}

impl Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DatasetKind::Indicators => "indicators",
                DatasetKind::Tariffs => "tariffs",
                DatasetKind::TaxBills => "tax-bills",
                DatasetKind::Market => "market",
            }
        )
    }
}

impl FromStr for DatasetKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "indicators" => Ok(DatasetKind::Indicators),
            "tariffs" => Ok(DatasetKind::Tariffs),
            "tax-bills" => Ok(DatasetKind::TaxBills),
            "market" => Ok(DatasetKind::Market),
            _ => Err(anyhow::anyhow!("Unknown dataset: {}", s)),
        }
    }
}

/// Fetches a dataset as loosely-typed JSON.
#[async_trait]
pub trait DatasetProvider: Send + Sync {
    async fn fetch(&self, kind: DatasetKind) -> Result<Value>;
}

/// Macroeconomic indicator grid (CPI, unemployment, GDP growth, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndicatorSet {
    #[serde(default)]
    pub indicators: Vec<Indicator>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Indicator {
    pub name: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub change_pct: Option<f64>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Tariff dataset: dated policy updates plus the per-country rate table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TariffData {
    #[serde(default)]
    pub updates: Vec<TariffUpdate>,
    #[serde(default)]
    pub country_tariffs: Vec<CountryTariff>,
    #[serde(default)]
    pub exemptions: Vec<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TariffUpdate {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub announcement_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub source_titles: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountryTariff {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub rate: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Tax-policy bills grouped by the policy area they were searched under.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxPolicyData {
    #[serde(default)]
    pub corporate_tax_bills: Vec<TaxBill>,
    #[serde(default)]
    pub individual_tax_bills: Vec<TaxBill>,
    #[serde(default)]
    pub investment_tax_bills: Vec<TaxBill>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl TaxPolicyData {
    pub fn categories(&self) -> [(&'static str, &[TaxBill]); 3] {
        [
            ("Corporate", self.corporate_tax_bills.as_slice()),
            ("Individual", self.individual_tax_bills.as_slice()),
            ("Investment & Capital", self.investment_tax_bills.as_slice()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.corporate_tax_bills.is_empty()
            && self.individual_tax_bills.is_empty()
            && self.investment_tax_bills.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxBill {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub sponsor: Option<String>,
    #[serde(default)]
    pub introduced_date: Option<String>,
    #[serde(default)]
    pub latest_action: Option<String>,
    #[serde(default)]
    pub search_keyword: Option<String>,
}
