//! Share-slug generation for shared lists.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of a generated share slug.
pub const SHARE_SLUG_LEN: usize = 12;

/// Generates a random URL-safe share slug.
///
/// Slugs are alphanumeric and lowercase so they read well in shared links.
/// Uniqueness is enforced by the database constraint, not here; callers
/// retry on collision.
pub fn generate_share_slug() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SHARE_SLUG_LEN)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_share_slug_length() {
        let slug = generate_share_slug();
        assert_eq!(slug.len(), SHARE_SLUG_LEN);
    }

    #[test]
    fn test_generate_share_slug_charset() {
        let slug = generate_share_slug();
        assert!(slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_share_slug_not_repeating() {
        let a = generate_share_slug();
        let b = generate_share_slug();
        assert_ne!(a, b);
    }
}
