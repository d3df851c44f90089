//! Known input type and language codes with their display names.
//!
//! Both vocabularies are open: a code that is not listed here is still
//! stored and exported as-is, and displays as the raw code.

/// Input type assigned when none is given.
pub const DEFAULT_INPUT_TYPE: &str = "text";

/// Known input types as `(code, display name)` pairs, in menu order.
pub const INPUT_TYPES: &[(&str, &str)] = &[
    ("text", "Text"),
    ("textarea", "Text Area"),
    ("address", "Address"),
    ("name", "Name"),
    ("number", "Number"),
    ("date", "Date"),
    ("email", "Email"),
    ("phone", "Phone"),
    ("checkbox", "Checkbox"),
    ("radio", "Radio"),
    ("select", "Select"),
    ("currency", "Currency"),
    ("percentage", "Percentage"),
    ("id", "ID"),
    ("signature", "Signature"),
];

/// Known language tags as `(code, display name)` pairs.
pub const LANGUAGES: &[(&str, &str)] = &[("en", "English"), ("ar", "Arabic")];

fn lookup<'a>(table: &'static [(&'static str, &'static str)], code: &'a str) -> &'a str {
    table
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, display)| *display)
        .unwrap_or(code)
}

/// Display name for an input type code, or the code itself if unknown.
pub fn input_type_display(code: &str) -> &str {
    lookup(INPUT_TYPES, code)
}

/// Display name for a language code, or the code itself if unknown.
pub fn lang_display(code: &str) -> &str {
    lookup(LANGUAGES, code)
}

pub fn is_known_input_type(code: &str) -> bool {
    INPUT_TYPES.iter().any(|(known, _)| *known == code)
}

pub fn is_known_lang(code: &str) -> bool {
    LANGUAGES.iter().any(|(known, _)| *known == code)
}
