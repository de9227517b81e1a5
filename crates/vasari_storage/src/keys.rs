//! Collision-resistant storage key generation.
//!
//! Keys follow `{category}/{YYYY}/{MM}/{DD}/{uuid}.{ext}`. The date
//! partition keeps any one directory small on filesystem backends and makes
//! retention sweeps cheap; the v4 UUID makes collisions negligible without
//! coordination.

use chrono::Utc;
use uuid::Uuid;

/// Generate a storage key for the given category and file extension.
///
/// # Examples
///
/// ```
/// let key = vasari_storage::keys::generate("originals", "png");
/// assert!(key.starts_with("originals/"));
/// assert!(key.ends_with(".png"));
/// ```
pub fn generate(category: &str, extension: &str) -> String {
    format!(
        "{}/{}/{}.{}",
        category,
        Utc::now().format("%Y/%m/%d"),
        Uuid::new_v4().simple(),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_has_date_partitioned_shape() {
        let key = generate("originals", "jpg");
        let segments: Vec<&str> = key.split('/').collect();
        // category / year / month / day / file
        assert_eq!(segments.len(), 5);
        assert_eq!(segments[0], "originals");
        assert_eq!(segments[1].len(), 4);
        assert_eq!(segments[2].len(), 2);
        assert_eq!(segments[3].len(), 2);
        assert!(segments[4].ends_with(".jpg"));
    }

    #[test]
    fn keys_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(generate("renditions", "jpg")));
        }
    }
}
