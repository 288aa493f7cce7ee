//! Outbound messaging hand-off.
//!
//! Order confirmations are delegated to an external chat application via a
//! pre-filled deep link: `https://wa.me/<number>?text=<encoded summary>`,
//! opened in a new context. This is a one-way notification port with no
//! delivery confirmation, no response, and no retry contract.

use crate::models::Order;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::sync::Arc;
use tracing::info;

/// Characters escaped in the deep-link query text. Matches the unreserved
/// set of `encodeURIComponent`: alphanumerics and `- _ . ! ~ * ' ( )` pass
/// through.
const QUERY_TEXT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Where a dispatched deep link is opened. Implementations must not report
/// back; dispatch is fire-and-forget.
pub trait MessagePort: Send + Sync {
    fn open(&self, url: &str);
}

/// Default port: logs the link instead of opening a browsing context.
pub struct LoggedPort;

impl MessagePort for LoggedPort {
    fn open(&self, url: &str) {
        info!(url, "dispatching order hand-off link");
    }
}

/// WhatsApp hand-off bound to a fixed recipient number.
#[derive(Clone)]
pub struct WhatsAppHandoff {
    number: String,
    port: Arc<dyn MessagePort>,
}

impl WhatsAppHandoff {
    pub fn new(number: impl Into<String>, port: Arc<dyn MessagePort>) -> Self {
        Self {
            number: number.into(),
            port,
        }
    }

    /// Formats the order summary and dispatches the pre-filled deep link.
    pub fn send(&self, order: &Order) {
        let message = format_order_message(order);
        let url = whatsapp_link(&self.number, &message);
        self.port.open(&url);
    }
}

/// Plain-text multi-line order summary handed to the messaging channel.
pub fn format_order_message(order: &Order) -> String {
    let items_text = order
        .items
        .iter()
        .map(|i| format!("{} ({}x)", i.name, i.quantity))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "New Order from Akhis Homemade!\n\nName: {}\nAddress: {}\nPhone: {}\nItems: {}\nTotal: ৳{}",
        order.customer_name, order.address, order.phone, items_text, order.total
    )
}

/// Builds the `wa.me` deep link with the summary percent-encoded into the
/// `text` query parameter.
pub fn whatsapp_link(number: &str, message: &str) -> String {
    format!(
        "https://wa.me/{number}?text={}",
        utf8_percent_encode(message, QUERY_TEXT)
    )
}
