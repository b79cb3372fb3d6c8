use super::{print_check_summary, resolve_target_date, ui};
use crate::core::config::AppConfig;
use crate::core::monitor;
use crate::providers::{finnhub::FinnhubProvider, sendgrid::SendGridMailer};
use anyhow::Result;
use tracing::debug;

/// Checks the calendar for a date and mails the report.
///
/// Fails when credentials are missing or the mail is not accepted.
pub async fn run(config: &AppConfig, date: Option<&str>) -> Result<()> {
    let credentials = config.credentials.with_env().validate()?;
    debug!(?credentials, "Validated credentials");
    let target_date = resolve_target_date(date, config.utc_offset_hours)?;

    let calendar = FinnhubProvider::new(
        &config.providers.finnhub.base_url,
        &credentials.finnhub_api_key,
    );
    let mailer = SendGridMailer::new(
        &config.providers.sendgrid.base_url,
        &credentials.sendgrid_api_key,
        &credentials.sender_email,
        &credentials.recipient_email,
    );

    let pb = ui::new_spinner("Fetching IPO calendar...");
    let check = monitor::check_date(&calendar, &target_date, config.min_offer_amount).await;
    pb.finish_and_clear();

    print_check_summary(&check, config.min_offer_amount);

    let pb = ui::new_spinner("Sending email notification...");
    let delivered = monitor::deliver(&mailer, &check.report).await;
    pb.finish_and_clear();

    if !delivered {
        println!(
            "\n{}",
            ui::style_text("IPO check completed with errors.", ui::StyleType::Error)
        );
        anyhow::bail!("Failed to deliver the IPO report for {}", target_date);
    }

    println!(
        "\n{} {}",
        ui::style_text("Report sent:", ui::StyleType::Success),
        check.report.subject()
    );
    Ok(())
}
