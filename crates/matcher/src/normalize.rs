//! Text normalization used when comparing query values with stored data.
use criteria::Gender;

/// Zero-width and byte-order characters that show up in pasted data.
fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}' | '\u{00AD}'
    )
}

/// Trim, drop invisible characters and lowercase.
pub fn fold(value: &str) -> String {
    value
        .chars()
        .filter(|c| !is_invisible(*c))
        .collect::<String>()
        .trim()
        .to_lowercase()
}

/// ASCII digits only; `"+91 98765-43210"` becomes `"919876543210"`.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Lenient read of a stored gender value.
pub fn stored_gender(value: &str) -> Option<Gender> {
    match fold(value).as_str() {
        "male" => Some(Gender::Male),
        "female" => Some(Gender::Female),
        _ => None,
    }
}
