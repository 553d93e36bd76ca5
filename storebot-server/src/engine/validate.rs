//! Input validation for free-text answers.
//!
//! Each check returns the cleaned value or a `Validation` error whose
//! message is sent back to the user as-is, leaving them in the same state
//! to try again.

use rust_decimal::Decimal;

use super::error::{DialogError, DialogResult};

pub const MIN_NAME_LEN: usize = 3;
pub const MIN_DESCRIPTION_LEN: usize = 10;
pub const MIN_PHONE_LEN: usize = 10;
pub const MIN_ADDRESS_LEN: usize = 10;

pub fn product_name(input: &str) -> DialogResult<String> {
    let name = input.trim();
    if name.chars().count() < MIN_NAME_LEN {
        return Err(DialogError::validation(format!(
            "❌ Name is too short, at least {MIN_NAME_LEN} characters. Try again:"
        )));
    }
    Ok(name.to_string())
}

pub fn product_description(input: &str) -> DialogResult<String> {
    let description = input.trim();
    if description.chars().count() < MIN_DESCRIPTION_LEN {
        return Err(DialogError::validation(format!(
            "❌ Description is too short, at least {MIN_DESCRIPTION_LEN} characters. Try again:"
        )));
    }
    Ok(description.to_string())
}

/// Accepts "15000", "15 000,50", "1,5" and the like; must be positive.
pub fn price(input: &str) -> DialogResult<Decimal> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let value = cleaned.parse::<Decimal>().map_err(|_| {
        DialogError::validation("❌ That doesn't look like a price. Send a number, e.g. 15000 or 15000.50:")
    })?;
    if value <= Decimal::ZERO {
        return Err(DialogError::validation(
            "❌ Price must be greater than zero. Try again:",
        ));
    }
    Ok(value.normalize())
}

pub fn phone(input: &str) -> DialogResult<String> {
    let phone = input.trim();
    if phone.chars().count() < MIN_PHONE_LEN {
        return Err(DialogError::validation(
            "❌ Phone number looks too short. Send it like +71234567890:",
        ));
    }
    Ok(phone.to_string())
}

pub fn address(input: &str) -> DialogResult<String> {
    let address = input.trim();
    if address.chars().count() < MIN_ADDRESS_LEN {
        return Err(DialogError::validation(
            "❌ Address is too short. Include city, street and house number:",
        ));
    }
    Ok(address.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed_and_length_checked() {
        assert_eq!(product_name("  Oak table  ").unwrap(), "Oak table");
        assert!(product_name("ab").is_err());
        // Length is in characters, not bytes.
        assert_eq!(product_name("Шкаф").unwrap(), "Шкаф");
    }

    #[test]
    fn description_needs_ten_characters() {
        assert!(product_description("too short").is_err());
        assert_eq!(
            product_description("Solid oak dining table").unwrap(),
            "Solid oak dining table"
        );
    }

    #[test]
    fn price_accepts_human_formats() {
        assert_eq!(price("15000").unwrap(), Decimal::from(15000));
        assert_eq!(price("15 000,50").unwrap(), "15000.50".parse().unwrap());
        assert_eq!(price("1,5").unwrap(), "1.5".parse().unwrap());
        assert_eq!(price(" 99.90 ").unwrap(), "99.9".parse().unwrap());
    }

    #[test]
    fn price_rejects_garbage_zero_and_negatives() {
        for bad in ["abc", "", "0", "-5", "12,34,56"] {
            assert!(price(bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn phone_and_address_have_minimum_lengths() {
        assert_eq!(phone("+71234567890").unwrap(), "+71234567890");
        assert!(phone("12345").is_err());
        assert_eq!(
            address("Moscow, Lenina 1, apt 5").unwrap(),
            "Moscow, Lenina 1, apt 5"
        );
        assert!(address("Moscow").is_err());
    }
}
