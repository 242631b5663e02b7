//! WhatsApp click-to-chat link construction.

use url::form_urlencoded;

/// Base of the `wa.me` click-to-chat deep link.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me/";

/// Fixed greeting pre-filled in every chat opened from the map.
pub const GREETING: &str =
    "Olá, encontrei seu contato na Smartway. Poderia me ajudar com minha scooter?";

/// Builds `https://wa.me/{phone}?text={greeting}` for an already normalized phone.
///
/// The greeting is form-encoded: spaces become `+` and non-ASCII bytes are
/// percent-encoded as UTF-8. An empty `phone` still produces a well-formed
/// link without a destination.
pub fn whatsapp_link(normalized_phone: &str) -> String {
    format!(
        "{WHATSAPP_BASE_URL}{normalized_phone}?text={}",
        encode_query_value(GREETING)
    )
}

/// Encodes a single query value using `application/x-www-form-urlencoded` rules.
pub fn encode_query_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
