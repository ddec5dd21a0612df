//! Order confirmation emails.
//!
//! [`EmailNotifier`] implements [`jewelry_core::order::Notifier`] on top of a
//! transactional-email HTTP API (SendGrid v3 `mail/send`). Without an API key
//! it is disabled: every attempt is logged and reported as
//! [`Delivery::Skipped`].

pub mod error;
pub mod render;

use std::time::Duration;

use jewelry_core::order::{Delivery, Notifier, Order};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

pub use error::{Error, Result};
pub use render::{Confirmation, render_confirmation};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Mail settings, deserialised from the `[email]` config table.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
  /// Provider credential. Absent or empty disables delivery.
  #[serde(default)]
  pub api_key:      Option<String>,
  #[serde(default = "default_from_email")]
  pub from_email:   String,
  #[serde(default = "default_from_name")]
  pub from_name:    String,
  #[serde(default = "default_api_base_url")]
  pub api_base_url: String,
}

fn default_from_email() -> String { "noreply@jewelrydemo.com".to_string() }

fn default_from_name() -> String { "Ryan H Jewelry Co.".to_string() }

fn default_api_base_url() -> String { "https://api.sendgrid.com".to_string() }

impl Default for EmailConfig {
  fn default() -> Self {
    Self {
      api_key:      None,
      from_email:   default_from_email(),
      from_name:    default_from_name(),
      api_base_url: default_api_base_url(),
    }
  }
}

impl EmailConfig {
  fn api_key(&self) -> Option<&str> {
    self.api_key.as_deref().filter(|k| !k.trim().is_empty())
  }

  pub fn is_enabled(&self) -> bool { self.api_key().is_some() }
}

// ─── Notifier ─────────────────────────────────────────────────────────────────

/// Sends order confirmations through the configured mail provider.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct EmailNotifier {
  client: Client,
  config: EmailConfig,
}

impl EmailNotifier {
  pub fn new(config: EmailConfig) -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Ok(Self { client, config })
  }

  pub fn config(&self) -> &EmailConfig { &self.config }

  fn url(&self) -> String {
    format!("{}/v3/mail/send", self.config.api_base_url.trim_end_matches('/'))
  }

  fn payload(&self, order: &Order, confirmation: &Confirmation) -> serde_json::Value {
    json!({
      "personalizations": [{
        "to": [{ "email": order.customer_email, "name": order.customer_name }]
      }],
      "from": { "email": self.config.from_email, "name": self.config.from_name },
      "subject": confirmation.subject,
      "content": [
        { "type": "text/plain", "value": confirmation.text },
        { "type": "text/html",  "value": confirmation.html }
      ]
    })
  }
}

impl Notifier for EmailNotifier {
  type Error = Error;

  async fn send_order_confirmation(&self, order: &Order) -> Result<Delivery> {
    let Some(api_key) = self.config.api_key() else {
      tracing::warn!(order_id = %order.id, "mail API key not configured; skipping email send");
      return Ok(Delivery::Skipped);
    };

    let confirmation = render_confirmation(order, &self.config.from_name)?;
    let resp = self
      .client
      .post(self.url())
      .bearer_auth(api_key)
      .json(&self.payload(order, &confirmation))
      .send()
      .await?;

    if !resp.status().is_success() {
      return Err(Error::Rejected { status: resp.status() });
    }

    tracing::info!(to = %order.customer_email, subject = %confirmation.subject, "email sent");
    Ok(Delivery::Sent)
  }
}

#[cfg(test)]
mod tests {
  use jewelry_core::order::Order;

  use super::*;

  #[tokio::test]
  async fn missing_key_skips_delivery() {
    let notifier = EmailNotifier::new(EmailConfig::default()).unwrap();
    let order = Order::new("Jane Doe", "jane@example.com", Vec::new());
    let outcome = notifier.send_order_confirmation(&order).await.unwrap();
    assert_eq!(outcome, Delivery::Skipped);
  }

  #[tokio::test]
  async fn blank_key_counts_as_missing() {
    let config = EmailConfig { api_key: Some("  ".into()), ..EmailConfig::default() };
    assert!(!config.is_enabled());
    let notifier = EmailNotifier::new(config).unwrap();
    let order = Order::new("Jane Doe", "jane@example.com", Vec::new());
    assert_eq!(
      notifier.send_order_confirmation(&order).await.unwrap(),
      Delivery::Skipped
    );
  }

  #[test]
  fn payload_addresses_customer() {
    let notifier = EmailNotifier::new(EmailConfig::default()).unwrap();
    let order = Order::new("Jane Doe", "jane@example.com", Vec::new());
    let confirmation = render_confirmation(&order, "Ryan H Jewelry Co.").unwrap();
    let body = notifier.payload(&order, &confirmation);

    assert_eq!(body["personalizations"][0]["to"][0]["email"], "jane@example.com");
    assert_eq!(body["from"]["email"], "noreply@jewelrydemo.com");
    assert_eq!(body["content"][1]["type"], "text/html");
    assert_eq!(notifier.url(), "https://api.sendgrid.com/v3/mail/send");
  }
}
