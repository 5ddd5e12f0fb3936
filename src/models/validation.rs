//! Field rules shared by the registration and settings forms.

use std::borrow::Cow;

use time::{macros::format_description, Date};
use validator::ValidationError;

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Letters, optionally joined by `-` or `'`, with at most one space.
pub fn validate_person_name(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    let words: Vec<&str> = trimmed.split(' ').collect();
    let word_ok = |word: &str| {
        !word.is_empty()
            && word
                .split(['-', '\''])
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphabetic()))
    };
    if words.len() <= 2 && words.iter().all(|w| word_ok(w)) {
        Ok(())
    } else {
        Err(invalid("name", "Only letters, hyphens and apostrophes are allowed."))
    }
}

/// National identity number: exactly 13 digits once dashes are removed.
pub fn validate_cnic(value: &str) -> Result<(), ValidationError> {
    let digits: String = value.chars().filter(|c| *c != '-').collect();
    if digits.len() == 13 && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(invalid("cnic", "CNIC must be exactly 13 digits."))
    }
}

/// Mobile numbers are `03` followed by nine digits.
pub fn validate_mobile(value: &str) -> Result<(), ValidationError> {
    if value.len() == 11 && value.starts_with("03") && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(invalid("mobile", "Enter a valid mobile number (03XXXXXXXXX)."))
    }
}

pub fn validate_iso_date(value: &str) -> Result<(), ValidationError> {
    parse_iso_date(value)
        .map(|_| ())
        .ok_or_else(|| invalid("date", "Use the YYYY-MM-DD format."))
}

pub fn parse_iso_date(value: &str) -> Option<Date> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).ok()
}

pub fn format_iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// At least 8 characters with an uppercase letter, a digit and a symbol.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_ascii_alphanumeric())
}

/// Strip dashes from a formatted CNIC (`12345-1234567-1`).
pub fn plain_cnic(value: &str) -> String {
    value.chars().filter(|c| *c != '-').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert!(validate_person_name("Ayesha").is_ok());
        assert!(validate_person_name("Mary-Jane O'Neil").is_ok());
        assert!(validate_person_name("Ali2").is_err());
        assert!(validate_person_name("a b c").is_err());
        assert!(validate_person_name("-Ali").is_err());
    }

    #[test]
    fn cnic_accepts_formatted_and_plain() {
        assert!(validate_cnic("35202-1234567-1").is_ok());
        assert!(validate_cnic("3520212345671").is_ok());
        assert!(validate_cnic("35202-123456").is_err());
        assert_eq!(plain_cnic("35202-1234567-1"), "3520212345671");
    }

    #[test]
    fn mobile_numbers() {
        assert!(validate_mobile("03001234567").is_ok());
        assert!(validate_mobile("0300123456").is_err());
        assert!(validate_mobile("04001234567").is_err());
    }

    #[test]
    fn dates_round_trip() {
        let date = parse_iso_date("2026-03-07").unwrap();
        assert_eq!(format_iso_date(date), "2026-03-07");
        assert!(validate_iso_date("07/03/2026").is_err());
    }

    #[test]
    fn password_strength() {
        assert!(is_strong_password("Secret#123"));
        assert!(!is_strong_password("secret#123"));
        assert!(!is_strong_password("Secret123"));
        assert!(!is_strong_password("Se#1"));
    }
}
