// Launch prices are USD millions written with `,` thousands separators,
// e.g. "5,000.0". Missing prices stay missing, never zero.
use std::str::FromStr;

use crate::error::RecordError;

pub fn normalize_price(text: Option<&str>) -> Result<Option<f64>, RecordError> {
    let raw = match text.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    let normalized = raw.replace(',', "");
    match f64::from_str(&normalized) {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(RecordError::PriceFormat {
            input: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_with_thousands() {
        assert_eq!(normalize_price(Some("1,234.5")).unwrap(), Some(1234.5));
        assert_eq!(normalize_price(Some("5,000.0")).unwrap(), Some(5000.0));
    }

    #[test]
    fn test_parse_price_simple() {
        assert_eq!(normalize_price(Some("50.0")).unwrap(), Some(50.0));
        assert_eq!(normalize_price(Some(" 7.5 ")).unwrap(), Some(7.5));
    }

    #[test]
    fn test_missing_price_is_none() {
        assert_eq!(normalize_price(None).unwrap(), None);
        assert_eq!(normalize_price(Some("")).unwrap(), None);
        assert_eq!(normalize_price(Some("   ")).unwrap(), None);
    }

    #[test]
    fn test_non_numeric_price_fails() {
        assert_eq!(
            normalize_price(Some("abc")),
            Err(RecordError::PriceFormat {
                input: "abc".to_string()
            })
        );
    }

    #[test]
    fn test_non_finite_price_fails() {
        assert!(normalize_price(Some("NaN")).is_err());
        assert!(normalize_price(Some("inf")).is_err());
    }
}
