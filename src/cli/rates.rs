use crate::cli::ui::{self, StyleType};
use crate::core::error::RateError;
use crate::core::rates::RateTable;
use crate::providers::ecb::EcbRateProvider;
use anyhow::Result;
use comfy_table::Table;

/// Prints every quote published for `base`.
pub async fn show_rates(provider: &EcbRateProvider, base: &str) -> Result<()> {
    let spinner = ui::new_spinner("Fetching reference rates");
    let result = provider.rate_table().await;
    spinner.finish_and_clear();

    let table = result?;
    let title = match table.published() {
        Some(date) => format!("Reference rates for 1 {base} ({date})"),
        None => format!("Reference rates for 1 {base}"),
    };
    println!("\n{}", ui::style_text(&title, StyleType::Title));
    println!("{}", render_rates(&table, base)?);
    println!(
        "{}",
        ui::style_text(&format!("Source: {}", provider.feed_uri()), StyleType::Subtle)
    );
    Ok(())
}

pub fn render_rates(table: &RateTable, base: &str) -> Result<Table> {
    let quotes = table
        .quotes(base)
        .ok_or_else(|| RateError::SourceRateUnavailable {
            source_currency: base.to_string(),
            target_currency: "*".to_string(),
        })?;

    let mut output = ui::new_styled_table();
    output.set_header(vec![ui::header_cell("Currency"), ui::header_cell("Rate")]);
    for (currency, rate) in quotes.iter().filter(|(currency, _)| currency.as_str() != base) {
        output.add_row(vec![comfy_table::Cell::new(currency), ui::rate_cell(*rate)]);
    }
    Ok(output)
}
