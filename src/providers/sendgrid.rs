use crate::core::mail::Mailer;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, instrument};

use super::USER_AGENT;

const MAIL_SEND_PATH: &str = "/v3/mail/send";

pub struct SendGridMailer {
    base_url: String,
    api_key: String,
    sender: String,
    recipient: String,
}

impl SendGridMailer {
    pub fn new(base_url: &str, api_key: &str, sender: &str, recipient: &str) -> Self {
        SendGridMailer {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            sender: sender.to_string(),
            recipient: recipient.to_string(),
        }
    }
}

#[derive(Serialize, Debug)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Serialize, Debug)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Serialize, Debug)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}

#[derive(Serialize, Debug)]
struct MailRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

#[async_trait]
impl Mailer for SendGridMailer {
    #[instrument(name = "SendGridSend", skip(self, html_body))]
    async fn send(&self, subject: &str, html_body: &str) -> Result<()> {
        let request = MailRequest {
            personalizations: vec![Personalization {
                to: vec![Address {
                    email: &self.recipient,
                }],
            }],
            from: Address {
                email: &self.sender,
            },
            subject,
            content: vec![Content {
                content_type: "text/html",
                value: html_body,
            }],
        };

        let url = format!("{}{}", self.base_url, MAIL_SEND_PATH);
        debug!("Sending mail through {}", url);

        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let response = client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        let status = response.status();
        debug!(status = %status, "Received SendGrid response");

        match status.as_u16() {
            200 | 201 | 202 => Ok(()),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(anyhow!("Mail send failed with status {}: {}", status, body))
            }
        }
    }
}
