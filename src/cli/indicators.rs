use super::ui;
use crate::core::dataset::{DatasetKind, DatasetProvider, IndicatorSet};
use anyhow::{Context, Result};
use comfy_table::Cell;

pub async fn run(provider: &dyn DatasetProvider) -> Result<()> {
    let value = provider.fetch(DatasetKind::Indicators).await?;
    let set: IndicatorSet =
        serde_json::from_value(value).context("Malformed indicators dataset")?;
    render(&set);
    Ok(())
}

pub fn render(set: &IndicatorSet) {
    println!(
        "{}",
        ui::style_text("Economic Indicators", ui::StyleType::Title)
    );

    if set.indicators.is_empty() {
        println!("{}", ui::section_placeholder("Indicators"));
        return;
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Indicator"),
        ui::header_cell("Value"),
        ui::header_cell("Period"),
        ui::header_cell("Change"),
        ui::header_cell("Source"),
    ]);

    for indicator in &set.indicators {
        let unit = indicator.unit.as_deref().unwrap_or("").to_string();
        let value = ui::format_optional_cell(indicator.value, |v| format!("{v:.1}{unit}"));
        let change = match indicator.change_pct {
            Some(change) => ui::change_cell(change),
            None => ui::format_optional_cell(None::<f64>, |v| format!("{v:.2}%")),
        };

        table.add_row(vec![
            Cell::new(&indicator.name),
            value,
            Cell::new(indicator.period.as_deref().unwrap_or("Unknown")),
            change,
            Cell::new(indicator.source.as_deref().unwrap_or("Unknown")),
        ]);
    }

    println!("{table}");

    if let Some(updated) = &set.last_updated {
        println!(
            "{}",
            ui::style_text(&format!("Last updated: {updated}"), ui::StyleType::Subtle)
        );
    }
}
