//! Input validators for the lead-capture steps. Pure functions over trimmed text.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex")
});

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 100;
const PHONE_MIN_DIGITS: usize = 10;
const PHONE_MAX_DIGITS: usize = 15;

/// Letters of any script plus spaces, hyphens, apostrophes and dots; at least one letter;
/// no leading/trailing hyphen; no doubled hyphens or spaces.
pub fn is_valid_name(name: &str) -> bool {
    let name = name.trim();
    let len = name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
        return false;
    }
    if !name
        .chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace() || matches!(c, '-' | '\'' | '.'))
    {
        return false;
    }
    if !name.chars().any(char::is_alphabetic) {
        return false;
    }
    if name.starts_with('-') || name.ends_with('-') {
        return false;
    }
    !(name.contains("--") || name.contains("  "))
}

/// 10 to 15 digits; only digits, whitespace, `-`, `(`, `)` and a single leading `+`.
pub fn is_valid_phone(phone: &str) -> bool {
    let phone = phone.trim();
    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '+' | '(' | ')'))
    {
        return false;
    }
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits) {
        return false;
    }
    match phone.matches('+').count() {
        0 => true,
        1 => phone.starts_with('+'),
        _ => false,
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}
