//! Common validation utilities.

use validator::ValidationError;

/// Maximum quantity a single gift item may request.
pub const MAX_ITEM_QUANTITY: i32 = 1000;

/// Maximum length of free-text notes on a purchase.
pub const MAX_NOTE_LENGTH: usize = 500;

/// Validates that an item quantity is positive and within bounds.
pub fn validate_quantity(quantity: i32) -> Result<(), ValidationError> {
    if (1..=MAX_ITEM_QUANTITY).contains(&quantity) {
        Ok(())
    } else {
        let mut err = ValidationError::new("quantity_range");
        err.message = Some(format!("Quantity must be between 1 and {}", MAX_ITEM_QUANTITY).into());
        Err(err)
    }
}

/// Validates that a product URL uses http or https.
pub fn validate_product_url(url: &str) -> Result<(), ValidationError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        let mut err = ValidationError::new("url_scheme");
        err.message = Some("URL must start with http:// or https://".into());
        Err(err)
    }
}

/// Validates that a price is non-negative.
pub fn validate_price(price: f64) -> Result<(), ValidationError> {
    if price >= 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("price_range");
        err.message = Some("Price must be non-negative".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity_valid() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(10).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
    }

    #[test]
    fn test_validate_quantity_invalid() {
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_product_url() {
        assert!(validate_product_url("https://shop.example.com/item/42").is_ok());
        assert!(validate_product_url("http://example.com").is_ok());
        assert!(validate_product_url("ftp://example.com").is_err());
        assert!(validate_product_url("javascript:alert(1)").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(19.99).is_ok());
        assert!(validate_price(-0.01).is_err());
    }
}
