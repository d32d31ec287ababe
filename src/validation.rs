//! Field validators.
//!
//! Every function here is pure and total: any input yields a boolean,
//! never an error.

use std::sync::LazyLock;

use regex_lite::Regex;

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z] [a-zA-Z]+").unwrap());
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+$").unwrap());

/// At least two alphabetic tokens separated by a single space.
pub fn is_valid_name(name: &str) -> bool {
    NAME.is_match(name)
}

/// Exactly one `@` with at least one character on each side. Broad
/// structural check, not full RFC validation.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Length >= 8 with at least one digit, one lowercase and one uppercase
/// letter.
pub fn is_valid_password(password: &str) -> bool {
    password.len() >= 8
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
}

/// CPF checksum over an 11-digit identity number.
///
/// Strings of 11 identical digits pass the checksum but are known-invalid
/// sentinels, so they are rejected upfront.
pub fn is_valid_document(document: &str) -> bool {
    if document.len() != 11 || !document.bytes().all(|b| b.is_ascii_digit())
    {
        return false;
    }

    let digits: Vec<u32> =
        document.bytes().map(|b| u32::from(b - b'0')).collect();
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9], 10) == digits[9]
        && check_digit(&digits[..10], 11) == digits[10]
}

/// Weighted checksum digit: weights run from `start_weight` down to 2,
/// then `(sum * 10) % 11`, with 10 reduced to 0.
fn check_digit(digits: &[u32], start_weight: u32) -> u32 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(position, digit)| digit * (start_weight - position as u32))
        .sum();

    let remainder = (sum * 10) % 11;
    if remainder == 10 { 0 } else { remainder }
}

/// Only `BTC` and `USD` are ledgered.
pub fn is_valid_asset_id(asset_id: &str) -> bool {
    matches!(asset_id, "BTC" | "USD")
}

/// Strictly positive amount. NaN fails.
pub fn is_valid_quantity(quantity: f64) -> bool {
    quantity > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name() {
        assert!(is_valid_name("John Doe"));
        assert!(is_valid_name("Ana Maria Souza"));
        assert!(!is_valid_name("John"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("1234 5678"));
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email("john.doe@gmail.com"));
        assert!(is_valid_email("a@b"));
        assert!(!is_valid_email("john.doe"));
        assert!(!is_valid_email("@gmail.com"));
        assert!(!is_valid_email("john@"));
        assert!(!is_valid_email("john@doe@gmail.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_password() {
        assert!(is_valid_password("asdQWE123"));
        assert!(!is_valid_password("asdQWE"));
        assert!(!is_valid_password("asdqwe123"));
        assert!(!is_valid_password("ASDQWE123"));
        assert!(!is_valid_password("asdQWEasd"));
        assert!(!is_valid_password(""));
    }

    #[test]
    fn test_document() {
        assert!(is_valid_document("97456321558"));
        assert!(is_valid_document("71428793860"));
        assert!(!is_valid_document("111"));
        assert!(!is_valid_document("abc"));
        assert!(!is_valid_document("7897897897"));
        assert!(!is_valid_document("11111111111"));
        assert!(!is_valid_document("00000000000"));
        assert!(!is_valid_document("97456321559"));
        assert!(!is_valid_document(""));
    }

    #[test]
    fn test_asset_id() {
        assert!(is_valid_asset_id("BTC"));
        assert!(is_valid_asset_id("USD"));
        assert!(!is_valid_asset_id("BRL"));
        assert!(!is_valid_asset_id("btc"));
        assert!(!is_valid_asset_id(""));
    }

    #[test]
    fn test_quantity() {
        assert!(is_valid_quantity(10.0));
        assert!(is_valid_quantity(0.00000001));
        assert!(!is_valid_quantity(0.0));
        assert!(!is_valid_quantity(-1.0));
        assert!(!is_valid_quantity(f64::NAN));
    }
}
