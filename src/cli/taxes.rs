use super::ui;
use crate::core::dataset::{DatasetKind, DatasetProvider, TaxPolicyData};
use anyhow::{Context, Result};
use comfy_table::Cell;

pub async fn run(provider: &dyn DatasetProvider) -> Result<()> {
    let value = provider.fetch(DatasetKind::TaxBills).await?;
    let data: TaxPolicyData =
        serde_json::from_value(value).context("Malformed tax-policy dataset")?;
    render(&data);
    Ok(())
}

pub fn render(data: &TaxPolicyData) {
    println!(
        "{}",
        ui::style_text("Tax Policy Bills", ui::StyleType::Title)
    );

    if data.is_empty() {
        println!("{}", ui::section_placeholder("Tax bills"));
        return;
    }

    for (category, bills) in data.categories() {
        if bills.is_empty() {
            continue;
        }
        println!("\n{}", ui::style_text(category, ui::StyleType::Label));

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Bill"),
            ui::header_cell("Title"),
            ui::header_cell("Sponsor"),
            ui::header_cell("Introduced"),
            ui::header_cell("Latest Action"),
        ]);

        for bill in bills {
            table.add_row(vec![
                Cell::new(bill.number.as_deref().unwrap_or("N/A")),
                Cell::new(ui::truncate(bill.title.as_deref().unwrap_or("Unknown"), 60)),
                Cell::new(bill.sponsor.as_deref().unwrap_or("Unknown")),
                Cell::new(bill.introduced_date.as_deref().unwrap_or("Unknown")),
                Cell::new(ui::truncate(
                    bill.latest_action.as_deref().unwrap_or(""),
                    50,
                )),
            ]);
        }
        println!("{table}");
    }

    if let Some(updated) = &data.last_updated {
        println!(
            "{}",
            ui::style_text(&format!("Last updated: {updated}"), ui::StyleType::Subtle)
        );
    }
}
