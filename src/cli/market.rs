use super::ui;
use crate::config::AppConfig;
use crate::core::dataset::{DatasetKind, DatasetProvider};
use crate::core::market::{self, AlignedTerm, MarketComparison};
use anyhow::{Context, Result};
use comfy_table::Cell;
use console::style;

pub async fn run(provider: &dyn DatasetProvider, config: &AppConfig) -> Result<()> {
    let value = provider.fetch(DatasetKind::Market).await?;
    let comparison: MarketComparison =
        serde_json::from_value(value).context("Malformed market dataset")?;

    let window_days = market::resolve_window_days(config.window_days, &comparison);
    let terms = market::align_terms(&comparison, window_days);
    render(&terms, window_days);
    Ok(())
}

pub fn render(terms: &[AlignedTerm], window_days: i64) {
    println!(
        "{}",
        ui::style_text("Presidential Market Comparison", ui::StyleType::Title)
    );
    println!(
        "{}",
        ui::style_text(
            &format!("First {window_days} days in office, S&P 500"),
            ui::StyleType::Subtle
        )
    );

    if terms.is_empty() {
        println!("{}", ui::section_placeholder("Market comparison"));
        return;
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Rank"),
        ui::header_cell("President"),
        ui::header_cell("Party"),
        ui::header_cell("Term"),
        ui::header_cell("Total Return"),
        ui::header_cell("Annualized"),
        ui::header_cell("Volatility"),
        ui::header_cell("Max Drawdown"),
        ui::header_cell("Trading Days"),
    ]);

    for (rank, term) in terms.iter().enumerate() {
        let mut row = vec![
            Cell::new(format!("{}", rank + 1)),
            Cell::new(&term.president),
            Cell::new(term.party.as_deref().unwrap_or("Unknown")),
            Cell::new(term.term.as_deref().unwrap_or("Unknown")),
        ];
        match &term.performance {
            Some(perf) => {
                row.push(ui::change_cell(perf.total_return_pct));
                row.push(ui::change_cell(perf.annualized_return_pct));
                row.push(ui::format_optional_cell(Some(perf.volatility_pct), |v| {
                    format!("{v:.1}%")
                }));
                row.push(ui::format_optional_cell(
                    Some(perf.max_drawdown_pct),
                    |v| format!("{v:.1}%"),
                ));
                row.push(ui::format_optional_cell(Some(perf.trading_days), |v| {
                    format!("{v}")
                }));
            }
            None => {
                for _ in 0..5 {
                    row.push(ui::format_optional_cell(None::<f64>, |v| format!("{v}")));
                }
            }
        }
        table.add_row(row);
    }

    println!("{table}");
    render_summary(terms);
}

/// Average/best/worst lines under the ranking table.
fn render_summary(terms: &[AlignedTerm]) {
    let scored: Vec<&AlignedTerm> = terms.iter().filter(|t| t.performance.is_some()).collect();
    if scored.len() < 2 {
        return;
    }

    let returns: Vec<f64> = scored
        .iter()
        .filter_map(|t| t.performance.as_ref().map(|p| p.total_return_pct))
        .collect();
    let volatilities: Vec<f64> = scored
        .iter()
        .filter_map(|t| t.performance.as_ref().map(|p| p.volatility_pct))
        .collect();
    let avg_return = returns.iter().sum::<f64>() / returns.len() as f64;
    let avg_volatility = volatilities.iter().sum::<f64>() / volatilities.len() as f64;

    println!(
        "\n{} {:.1}%   {} {:.1}%",
        ui::style_text("Average return:", ui::StyleType::Label),
        avg_return,
        ui::style_text("Average volatility:", ui::StyleType::Label),
        avg_volatility
    );

    // Ranked best-first, so the extremes are the list ends
    if let (Some(best), Some(worst)) = (scored.first(), scored.last()) {
        let best_pct = best.performance.as_ref().map(|p| p.total_return_pct);
        let worst_pct = worst.performance.as_ref().map(|p| p.total_return_pct);
        if let (Some(bp), Some(wp)) = (best_pct, worst_pct) {
            println!(
                "{} {} ({})   {} {} ({})",
                ui::style_text("Best:", ui::StyleType::Label),
                best.president,
                style(format!("{bp:+.1}%")).green(),
                ui::style_text("Worst:", ui::StyleType::Label),
                worst.president,
                style(format!("{wp:+.1}%")).red()
            );
        }
    }
}
