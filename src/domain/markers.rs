//! Marker builder: turns a located partner row into a map pin payload.

use crate::domain::entities::{MarkerPayload, PartnerRecord};
use crate::utils::contact_link::whatsapp_link;
use crate::utils::html::html_escape;
use crate::utils::phone::normalize_phone;

/// Shown in place of any absent text field.
pub const PLACEHOLDER: &str = "N/A";

/// Builds the marker for `row`, or `None` when it has no valid coordinates.
///
/// Never fails: absent text fields degrade to [`PLACEHOLDER`].
pub fn build(row: &PartnerRecord) -> Option<MarkerPayload> {
    let coordinates = row.coordinates()?;
    let whatsapp_link = contact_link(row);

    Some(MarkerPayload {
        coordinates,
        tooltip_text: tooltip_text(row),
        popup_html: popup_html(row, &whatsapp_link),
        whatsapp_link,
    })
}

/// WhatsApp link for the row's contact, normalized to an international number.
pub fn contact_link(row: &PartnerRecord) -> String {
    whatsapp_link(&normalize_phone(row.contact.as_deref().unwrap_or("")))
}

pub fn tooltip_text(row: &PartnerRecord) -> String {
    or_placeholder(&row.name).to_string()
}

/// Popup body with name, location, contact link and services.
///
/// Every row produces the same structure; values are HTML-escaped.
pub fn popup_html(row: &PartnerRecord, link: &str) -> String {
    format!(
        "<div style='font-size:16px; line-height:1.6;'>\
         <b>{name}</b><br>\
         📍 <b>{city}</b> - {region}<br>\
         📞 <a href='{link}' target='_blank'>{contact} (WhatsApp)</a><br>\
         🔧 <b>Serviços:</b> {services}\
         </div>",
        name = html_escape(or_placeholder(&row.name)),
        city = html_escape(or_placeholder(&row.city)),
        region = html_escape(or_placeholder(&row.region)),
        link = html_escape(link),
        contact = html_escape(or_placeholder(&row.contact)),
        services = html_escape(or_placeholder(&row.services)),
    )
}

fn or_placeholder(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(PLACEHOLDER)
}
