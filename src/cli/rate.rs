use crate::cli::ui::{self, StyleType};
use crate::core::currency::CurrencyRateProvider;
use anyhow::{Result, anyhow};
use rust_decimal::Decimal;

/// Prints the rate between two currencies, optionally converting an amount.
pub async fn show_rate(
    provider: &dyn CurrencyRateProvider,
    from: &str,
    to: &str,
    amount: Option<Decimal>,
) -> Result<()> {
    let spinner = ui::new_spinner(&format!("Resolving {from}/{to}"));
    let result = provider.get_rate(from, to).await;
    spinner.finish_and_clear();

    let rate = result?;
    println!("{}", format_conversion(from, to, rate, amount)?);
    Ok(())
}

pub fn format_conversion(
    from: &str,
    to: &str,
    rate: Decimal,
    amount: Option<Decimal>,
) -> Result<String> {
    let amount = amount.unwrap_or(Decimal::ONE);
    let converted = amount
        .checked_mul(rate)
        .ok_or_else(|| anyhow!("Converting {amount} {from} to {to} overflows"))?;
    Ok(format!(
        "{amount} {from} = {} {to}",
        ui::style_text(&converted.normalize().to_string(), StyleType::Value)
    ))
}
