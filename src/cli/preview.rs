use super::{print_check_summary, resolve_target_date, ui};
use crate::core::config::AppConfig;
use crate::core::monitor;
use crate::core::report::Report;
use crate::providers::finnhub::FinnhubProvider;
use anyhow::Result;
use comfy_table::Cell;

impl Report {
    pub fn display_as_table(&self) -> String {
        let mut output = format!("{}\n\n", ui::style_text(&self.title, ui::StyleType::Title));

        if let Some(heading) = &self.heading {
            output.push_str(&ui::style_text(heading, ui::StyleType::Heading));
            output.push('\n');
        }
        output.push_str(&self.summary);

        if self.is_empty() {
            return output;
        }

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Ticker"),
            ui::header_cell("Company Name"),
            ui::header_cell("Exchange"),
            ui::header_cell("Price"),
            ui::header_cell("Shares"),
            ui::header_cell("Offer Amount"),
        ]);

        for row in &self.rows {
            table.add_row(vec![
                Cell::new(&row.symbol),
                Cell::new(&row.name),
                Cell::new(&row.exchange),
                ui::number_cell(&row.price),
                ui::number_cell(&row.shares),
                ui::amount_cell(&row.offer_amount),
            ]);
        }

        output.push_str("\n\n");
        output.push_str(&table.to_string());
        output
    }
}

/// Prints the report for a date without sending any mail.
pub async fn run(config: &AppConfig, date: Option<&str>) -> Result<()> {
    let api_key = config.credentials.with_env().calendar_key()?;
    let target_date = resolve_target_date(date, config.utc_offset_hours)?;

    let calendar = FinnhubProvider::new(&config.providers.finnhub.base_url, &api_key);

    let pb = ui::new_spinner("Fetching IPO calendar...");
    let check = monitor::check_date(&calendar, &target_date, config.min_offer_amount).await;
    pb.finish_and_clear();

    print_check_summary(&check, config.min_offer_amount);
    println!();
    println!("{}", check.report.display_as_table());
    Ok(())
}
