//! Mail delivery abstraction

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends an HTML message. Any error means the message was not accepted.
    async fn send(&self, subject: &str, html_body: &str) -> Result<()>;
}
