//! Phone number normalization for WhatsApp deep links.

/// Country calling code prepended to local numbers.
pub const BRAZIL_CALLING_CODE: &str = "55";

/// Strips every non-digit character and prefixes the Brazilian calling code.
///
/// # Rules
///
/// 1. Only ASCII digits are kept (`"(11) 91234-5678"` → `"11912345678"`)
/// 2. A number that already starts with `55` is left as-is
/// 3. Anything else gets `55` prepended
/// 4. An input with no digits at all yields an empty string
///
/// Rule 4 means no bare `"55"` is ever produced. The resulting link has no
/// destination, which WhatsApp shows as a contact picker.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_phone("(11) 91234-5678"), "5511912345678");
/// assert_eq!(normalize_phone("+55 11 91234-5678"), "5511912345678");
/// assert_eq!(normalize_phone("n/a"), "");
/// ```
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    if digits.is_empty() || digits.starts_with(BRAZIL_CALLING_CODE) {
        digits
    } else {
        format!("{BRAZIL_CALLING_CODE}{digits}")
    }
}
