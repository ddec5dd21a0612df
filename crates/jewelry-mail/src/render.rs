//! Order confirmation bodies.
//!
//! Both bodies come from askama templates under `templates/`. The HTML one is
//! auto-escaped, so customer-supplied names cannot inject markup.

use askama::Template;
use jewelry_core::{cart::CartItem, order::Order};

use crate::Result;

/// Display copy of one order line.
struct LineView {
  name:    String,
  details: String,
  price:   String,
}

impl LineView {
  fn new(item: &CartItem) -> Self {
    let s = &item.selection;
    let mut details = format!(
      "Metal: {} • Stone: {} • Carat: {}",
      s.metal, s.stone, s.carat_size
    );
    if let Some(size) = s.size_label() {
      details.push_str(" • ");
      details.push_str(&size);
    }
    Self {
      name: item.product_name.clone(),
      details,
      price: format!("{:.2}", item.price),
    }
  }
}

#[derive(Template)]
#[template(path = "order_confirmation.html")]
struct ConfirmationHtml<'a> {
  store_name:     &'a str,
  order_id:       String,
  order_date:     String,
  customer_name:  &'a str,
  customer_email: &'a str,
  lines:          Vec<LineView>,
  total:          String,
}

#[derive(Template)]
#[template(path = "order_confirmation.txt")]
struct ConfirmationText<'a> {
  store_name:     &'a str,
  order_id:       String,
  order_date:     String,
  customer_name:  &'a str,
  customer_email: &'a str,
  lines:          Vec<LineView>,
  total:          String,
}

/// A rendered confirmation ready to hand to the mail provider.
#[derive(Debug, Clone)]
pub struct Confirmation {
  pub subject: String,
  pub text:    String,
  pub html:    String,
}

pub fn subject(order: &Order) -> String {
  format!("Order Confirmation - #{}", order.id)
}

/// Render both bodies for `order`, signed as `store_name`.
pub fn render_confirmation(order: &Order, store_name: &str) -> Result<Confirmation> {
  let order_id = order.id.to_string();
  let order_date = order.created_at.format("%B %d, %Y at %-I:%M %p").to_string();
  let total = format!("{:.2}", order.total);

  let html = ConfirmationHtml {
    store_name,
    order_id:       order_id.clone(),
    order_date:     order_date.clone(),
    customer_name:  &order.customer_name,
    customer_email: &order.customer_email,
    lines:          order.items.iter().map(LineView::new).collect(),
    total:          total.clone(),
  }
  .render()?;

  let text = ConfirmationText {
    store_name,
    order_id,
    order_date,
    customer_name:  &order.customer_name,
    customer_email: &order.customer_email,
    lines:          order.items.iter().map(LineView::new).collect(),
    total,
  }
  .render()?;

  Ok(Confirmation { subject: subject(order), text, html })
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};
  use jewelry_core::selection::Customization;
  use rust_decimal::Decimal;
  use uuid::Uuid;

  use super::*;

  fn order(customer_name: &str) -> Order {
    let item = CartItem {
      selection:    Customization {
        product_id:    2,
        metal:         "Rose Gold".into(),
        stone:         "Diamond".into(),
        carat_size:    "1ct".into(),
        ring_size:     None,
        necklace_size: Some("20\"".into()),
      },
      product_name: "Necklace Base".into(),
      price:        Decimal::new(1800, 0),
    };
    Order {
      id:             Uuid::nil(),
      customer_name:  customer_name.into(),
      customer_email: "jane@example.com".into(),
      total:          Decimal::new(1800, 0),
      items:          vec![item],
      created_at:     Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).unwrap(),
    }
  }

  #[test]
  fn text_body_lists_lines_and_total() {
    let c = render_confirmation(&order("Jane Doe"), "Ryan H Jewelry Co.").unwrap();
    assert!(c.text.contains("Customer: Jane Doe"), "{}", c.text);
    assert!(c.text.contains("Order Date: March 05, 2024 at 2:07 PM"), "{}", c.text);
    assert!(
      c.text.contains("- Necklace Base (Metal: Rose Gold • Stone: Diamond • Carat: 1ct • Necklace Length 20\"): $1800.00"),
      "{}",
      c.text
    );
    assert!(c.text.contains("Total: $1800.00"), "{}", c.text);
  }

  #[test]
  fn html_body_escapes_customer_input() {
    let c = render_confirmation(&order("<b>Jane</b>"), "Ryan H Jewelry Co.").unwrap();
    assert!(!c.html.contains("<b>"), "{}", c.html);
    assert!(c.html.contains("Jane"), "{}", c.html);
    assert!(c.html.contains("$1800.00"));
  }

  #[test]
  fn subject_carries_order_id() {
    assert_eq!(
      subject(&order("Jane")),
      "Order Confirmation - #00000000-0000-0000-0000-000000000000"
    );
  }
}
