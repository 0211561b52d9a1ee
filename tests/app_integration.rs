use std::fs;

mod test_utils {
    use polisight::core::dataset::DatasetKind;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn mount_dataset(server: &MockServer, kind: DatasetKind, body: &str) {
        let url_path = format!("/data/{}", kind.file_name());

        Mock::given(method("GET"))
            .and(path(&url_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    pub const INDICATORS: &str = r#"{
        "indicators": [
            {"name": "CPI", "value": 2.7, "unit": "%", "period": "2025-06", "change_pct": 0.2},
            {"name": "Unemployment Rate", "value": 4.1, "unit": "%"}
        ],
        "last_updated": "2025-07-01"
    }"#;

    pub const TARIFFS: &str = r#"{
        "updates": [
            {
                "title": "Steel and aluminum tariffs doubled",
                "description": "Section 232 rates raised on all imports.",
                "announcement_date": "2025-06-03",
                "status": "In effect",
                "source_titles": ["Reuters - Tariffs doubled", "Steel duties | Bloomberg"]
            },
            {
                "title": "Steel and aluminum tariffs doubled",
                "announcement_date": "2025-06-03"
            }
        ],
        "country_tariffs": [
            {"country": "China", "rate": "30%"},
            {"country": "European Union", "rate": "15%", "notes": "Framework agreement"}
        ],
        "exemptions": ["Pharmaceuticals", "Semiconductors"]
    }"#;

    pub const TAX_BILLS: &str = r#"{
        "corporate_tax_bills": [
            {"number": "H.R.1234", "title": "Corporate Rate Adjustment Act",
             "sponsor": "Rep. Example", "introduced_date": "2025-02-11"}
        ],
        "individual_tax_bills": [
            {"number": "S.567", "title": "Child Tax Credit Expansion"}
        ]
    }"#;

    pub const MARKET: &str = r#"{
        "metadata": {"comparison_period_days": 120, "data_source": "Yahoo Finance"},
        "presidential_data": {
            "Term A": {
                "president": "Term A",
                "metadata": {"party": "Republican", "term": "2017-2021",
                             "inauguration": "2017-01-20T00:00:00"},
                "daily_data": [
                    {"date": "2017-01-20", "open": 2271.0, "close": 2271.3},
                    {"date": "2017-03-20", "open": 2378.0, "close": 2373.5}
                ]
            },
            "Term B": {
                "president": "Term B",
                "metadata": {"party": "Democrat", "term": "2021-2025",
                             "inauguration": "2021-01-20T00:00:00"},
                "daily_data": [
                    {"date": "2021-01-20", "open": 3852.0, "close": 3851.9},
                    {"date": "2021-03-22", "open": 3901.0, "close": 3940.6}
                ]
            }
        }
    }"#;
}

#[test_log::test(tokio::test)]
async fn test_full_dashboard_flow_with_remote_mock() {
    use polisight::core::dataset::DatasetKind;

    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_dataset(&mock_server, DatasetKind::Indicators, test_utils::INDICATORS).await;
    test_utils::mount_dataset(&mock_server, DatasetKind::Tariffs, test_utils::TARIFFS).await;
    test_utils::mount_dataset(&mock_server, DatasetKind::TaxBills, test_utils::TAX_BILLS).await;
    test_utils::mount_dataset(&mock_server, DatasetKind::Market, test_utils::MARKET).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        r#"
data_service:
  base_url: {}
"#,
        mock_server.uri()
    );
    fs::write(config_file.path(), &config_content).expect("Failed to write config file");

    let result = polisight::run_command(
        polisight::AppCommand::Dashboard,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Dashboard command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_dashboard_falls_back_to_local_files() {
    // No remote routes mounted: every dataset must come from the data dir
    let mock_server = wiremock::MockServer::start().await;

    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(
        data_dir.path().join("economic_indicators.json"),
        test_utils::INDICATORS,
    )
    .unwrap();
    fs::write(
        data_dir.path().join("tariff_data_clean.json"),
        test_utils::TARIFFS,
    )
    .unwrap();
    fs::write(
        data_dir.path().join("tax_policy_bills.json"),
        test_utils::TAX_BILLS,
    )
    .unwrap();
    fs::write(
        data_dir.path().join("presidential_sp500_comparison.json"),
        test_utils::MARKET,
    )
    .unwrap();

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        r#"
data_service:
  base_url: {}
data_dir: {}
"#,
        mock_server.uri(),
        data_dir.path().display()
    );
    fs::write(config_file.path(), &config_content).expect("Failed to write config file");

    let result = polisight::run_command(
        polisight::AppCommand::Dashboard,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Fallback dashboard failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_dashboard_survives_missing_datasets() {
    // Remote 404s everything and no local files exist; every section should
    // degrade to a placeholder rather than an error.
    let mock_server = wiremock::MockServer::start().await;
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        r#"
data_service:
  base_url: {}
data_dir: {}
"#,
        mock_server.uri(),
        data_dir.path().display()
    );
    fs::write(config_file.path(), &config_content).expect("Failed to write config file");

    let result = polisight::run_command(
        polisight::AppCommand::Dashboard,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Dashboard should tolerate missing data: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_market_command_with_remote_mock() {
    use polisight::core::dataset::DatasetKind;

    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_dataset(&mock_server, DatasetKind::Market, test_utils::MARKET).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        r#"
data_service:
  base_url: {}
window_days: 90
"#,
        mock_server.uri()
    );
    fs::write(config_file.path(), &config_content).expect("Failed to write config file");

    let result = polisight::run_command(
        polisight::AppCommand::Market,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Market command failed with: {:?}",
        result.err()
    );
}
