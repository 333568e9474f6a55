/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Milliseconds per simulated day
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Convert a (possibly fractional) day count to milliseconds
pub fn days_to_millis(days: f64) -> i64 {
    (days * MILLIS_PER_DAY as f64) as i64
}

/// Generate a purchase-order identifier.
///
/// UUID v4, globally unique and stable for the order's lifetime.
pub fn order_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_to_millis_handles_fractions() {
        assert_eq!(days_to_millis(1.0), MILLIS_PER_DAY);
        assert_eq!(days_to_millis(0.5), MILLIS_PER_DAY / 2);
        assert_eq!(days_to_millis(0.0), 0);
    }

    #[test]
    fn order_ids_are_unique() {
        assert_ne!(order_id(), order_id());
    }
}
