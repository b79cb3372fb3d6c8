//! Report content for a day's IPO check.
//!
//! The report is plain structured data; the email body and the terminal
//! table are renderings of it.

use super::filter::MIN_OFFER_AMOUNT;
use super::ipo::QualifyingIpo;
use std::fmt::Write;

const DATA_SOURCE: &str = "Finnhub API";

/// Formats an amount as `$X.XXB`, `$X.XXM` or `$X,XXX.XX`.
pub fn format_currency(amount: f64) -> String {
    if amount >= 1_000_000_000.0 {
        format!("${:.2}B", amount / 1_000_000_000.0)
    } else if amount >= 1_000_000.0 {
        format!("${:.2}M", amount / 1_000_000.0)
    } else {
        format!("${}", group_thousands(&format!("{amount:.2}")))
    }
}

/// Formats a share count with thousands separators.
pub fn format_shares(shares: i64) -> String {
    group_thousands(&shares.to_string())
}

fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(number.len() + whole.len() / 3);
    grouped.push_str(sign);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// One table row, already formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub symbol: String,
    pub name: String,
    pub exchange: String,
    pub price: String,
    pub shares: String,
    pub offer_amount: String,
}

impl From<&QualifyingIpo> for ReportRow {
    fn from(ipo: &QualifyingIpo) -> Self {
        ReportRow {
            symbol: ipo.symbol.clone(),
            name: ipo.name.clone(),
            exchange: ipo.exchange.clone(),
            price: format!("${:.2}", ipo.price),
            shares: format_shares(ipo.shares),
            offer_amount: format_currency(ipo.offer_amount),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub date: String,
    pub title: String,
    /// Headline shown above the summary when there is nothing to list.
    pub heading: Option<String>,
    pub summary: String,
    pub rows: Vec<ReportRow>,
}

/// Builds reports against a minimum offer amount.
#[derive(Debug, Clone, Copy)]
pub struct ReportFormatter {
    min_offer_amount: f64,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(MIN_OFFER_AMOUNT)
    }
}

impl ReportFormatter {
    pub fn new(min_offer_amount: f64) -> Self {
        ReportFormatter { min_offer_amount }
    }

    /// Report listing the qualifying IPOs. Falls back to the empty report
    /// when there are none.
    pub fn build_report(&self, qualifying: &[QualifyingIpo], target_date: &str) -> Report {
        if qualifying.is_empty() {
            return self.build_empty_report(target_date);
        }

        Report {
            date: target_date.to_string(),
            title: format!("IPO Alert - {target_date}"),
            heading: None,
            summary: format!(
                "The following IPOs are scheduled for today ({target_date}) with offer amounts of at least {}:",
                format_currency(self.min_offer_amount)
            ),
            rows: qualifying.iter().map(ReportRow::from).collect(),
        }
    }

    pub fn build_empty_report(&self, target_date: &str) -> Report {
        Report {
            date: target_date.to_string(),
            title: format!("IPO Update - {target_date}"),
            heading: Some("No Qualifying IPOs Today".to_string()),
            summary: format!(
                "There are no U.S. stock market IPOs scheduled for today ({target_date}) with offer amounts of at least {}.",
                format_currency(self.min_offer_amount)
            ),
            rows: Vec::new(),
        }
    }
}

/// [`ReportFormatter::build_report`] with the default threshold.
pub fn build_report(qualifying: &[QualifyingIpo], target_date: &str) -> Report {
    ReportFormatter::default().build_report(qualifying, target_date)
}

/// [`ReportFormatter::build_empty_report`] with the default threshold.
pub fn build_empty_report(target_date: &str) -> Report {
    ReportFormatter::default().build_empty_report(target_date)
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.symbol.as_str()).collect()
    }

    pub fn subject(&self) -> String {
        if self.is_empty() {
            format!("IPO Update: No Qualifying IPOs - {}", self.date)
        } else {
            format!(
                "IPO Alert: {} IPO(s) Today - {}",
                self.rows.len(),
                self.symbols().join(", ")
            )
        }
    }

    /// Renders the report as an HTML email body.
    pub fn to_html(&self) -> String {
        let accent = if self.is_empty() { "#6c757d" } else { "#1a73e8" };

        let mut html = String::new();
        // Writing into a String cannot fail
        let _ = write!(
            html,
            r#"<html>
<head>
<style>
body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
.header {{ background-color: {accent}; color: white; padding: 20px; text-align: center; }}
.content {{ padding: 20px; }}
table {{ border-collapse: collapse; width: 100%; margin-top: 20px; }}
th, td {{ border: 1px solid #ddd; padding: 12px; text-align: left; }}
th {{ background-color: {accent}; color: white; }}
tr:nth-child(even) {{ background-color: #f9f9f9; }}
.amount {{ color: {accent}; font-weight: bold; }}
.footer {{ margin-top: 30px; padding-top: 20px; border-top: 1px solid #ddd; font-size: 12px; color: #666; }}
</style>
</head>
<body>
<div class="header"><h1>{title}</h1></div>
<div class="content">
"#,
            title = escape_html(&self.title),
        );

        if let Some(heading) = &self.heading {
            let _ = writeln!(html, "<h2>{}</h2>", escape_html(heading));
        }
        let _ = writeln!(html, "<p>{}</p>", escape_html(&self.summary));

        if !self.is_empty() {
            html.push_str(
                "<table>\n<tr><th>Ticker</th><th>Company Name</th><th>Exchange</th>\
                 <th>Price</th><th>Shares</th><th>Offer Amount</th></tr>\n",
            );
            for row in &self.rows {
                let _ = writeln!(
                    html,
                    "<tr><td><strong>{}</strong></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"amount\">{}</td></tr>",
                    escape_html(&row.symbol),
                    escape_html(&row.name),
                    escape_html(&row.exchange),
                    escape_html(&row.price),
                    escape_html(&row.shares),
                    escape_html(&row.offer_amount),
                );
            }
            html.push_str("</table>\n");
        }

        let _ = write!(
            html,
            r#"<div class="footer">
<p>This is an automated alert from ipo-watch.</p>
<p>Data source: {DATA_SOURCE}</p>
</div>
</div>
</body>
</html>
"#
        );
        html
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
