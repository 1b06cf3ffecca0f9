//! Small helpers shared by the portal crates

use chrono::NaiveDate;

/// Today's calendar date (UTC, no time component)
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Normalize an email for storage and comparison: trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Admin@Example.COM "), "admin@example.com");
        assert_eq!(normalize_email("user@example.com"), "user@example.com");
        assert_eq!(normalize_email("   "), "");
    }

    #[test]
    fn test_today_is_utc_date() {
        let before = chrono::Utc::now().date_naive();
        let date = today();
        // A midnight rollover between the two calls moves at most one day
        assert!(date >= before);
        assert!((date - before).num_days() <= 1);
    }
}
