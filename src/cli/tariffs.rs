use super::ui;
use crate::core::dataset::{DatasetKind, DatasetProvider, TariffData};
use anyhow::{Context, Result};
use comfy_table::Cell;

pub async fn run(provider: &dyn DatasetProvider) -> Result<()> {
    let value = provider.fetch(DatasetKind::Tariffs).await?;
    let data: TariffData = serde_json::from_value(value).context("Malformed tariff dataset")?;
    render(&data.normalized(), None);
    Ok(())
}

/// Renders tariff updates (optionally capped at `limit`) followed by the
/// country rate table and exemptions.
pub fn render(data: &TariffData, limit: Option<usize>) {
    println!("{}", ui::style_text("Tariff Updates", ui::StyleType::Title));

    if data.updates.is_empty() && data.country_tariffs.is_empty() {
        println!("{}", ui::section_placeholder("Tariffs"));
        return;
    }

    let shown = limit.unwrap_or(data.updates.len());
    for update in data.updates.iter().take(shown) {
        let date = update.announcement_date.as_deref().unwrap_or("Unknown");
        let status = update.status.as_deref().unwrap_or("");
        let headline = format!(
            "{}  {}",
            ui::style_text(date, ui::StyleType::Label),
            ui::truncate(&update.title, 90)
        );
        if status.is_empty() {
            println!("• {headline}");
        } else {
            println!(
                "• {headline} [{}]",
                ui::style_text(status, ui::StyleType::Subtle)
            );
        }
        if let Some(description) = &update.description {
            println!(
                "  {}",
                ui::style_text(&ui::truncate(description, 110), ui::StyleType::Subtle)
            );
        }
    }
    if data.updates.len() > shown {
        println!(
            "{}",
            ui::style_text(
                &format!("... and {} more updates", data.updates.len() - shown),
                ui::StyleType::Subtle
            )
        );
    }

    if !data.country_tariffs.is_empty() {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Country"),
            ui::header_cell("Rate"),
            ui::header_cell("Notes"),
        ]);
        for entry in &data.country_tariffs {
            table.add_row(vec![
                Cell::new(&entry.country),
                Cell::new(entry.rate.as_deref().unwrap_or("N/A")),
                Cell::new(entry.notes.as_deref().unwrap_or("")),
            ]);
        }
        println!("\n{table}");
    }

    if !data.exemptions.is_empty() {
        println!(
            "{} {}",
            ui::style_text("Exemptions:", ui::StyleType::Label),
            data.exemptions.join(", ")
        );
    }
    if !data.sources.is_empty() {
        println!(
            "{}",
            ui::style_text(
                &format!("Sources: {}", data.sources.join(", ")),
                ui::StyleType::Subtle
            )
        );
    }
}
