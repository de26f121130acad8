// ABOUTME: Shared utility functions for Command Vault
// ABOUTME: ID generation and monotonic timestamps for stored records

use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use uuid::Uuid;

/// Last timestamp handed out by `timestamp_now`, in microseconds since the epoch
static LAST_TIMESTAMP_MICROS: AtomicI64 = AtomicI64::new(0);

/// Generate a unique record ID (UUID v4)
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current UTC time at microsecond precision.
///
/// Successive calls within one process never return the same instant, so a
/// record updated right after creation still gets a strictly later timestamp.
pub fn timestamp_now() -> DateTime<Utc> {
    let now = Utc::now().timestamp_micros();
    let mut last = LAST_TIMESTAMP_MICROS.load(Ordering::Relaxed);

    loop {
        let next = if now > last { now } else { last + 1 };
        match LAST_TIMESTAMP_MICROS.compare_exchange_weak(
            last,
            next,
            Ordering::SeqCst,
            Ordering::Relaxed,
        ) {
            Ok(_) => return DateTime::from_timestamp_micros(next).unwrap_or_else(Utc::now),
            Err(current) => last = current,
        }
    }
}

/// Fixed-width RFC 3339 rendering used for stored timestamps.
///
/// Every value has the same width, so text ordering in SQL matches time ordering.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id() {
        let id1 = generate_id();
        let id2 = generate_id();

        assert_eq!(id1.len(), 36);
        assert_ne!(id1, id2);
        assert!(Uuid::parse_str(&id1).is_ok());
    }

    #[test]
    fn test_timestamp_now_strictly_increases() {
        let mut previous = timestamp_now();
        for _ in 0..1000 {
            let next = timestamp_now();
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn test_timestamp_now_not_before_wall_clock() {
        let before = Utc::now();
        let stamped = timestamp_now();
        // Truncation to microseconds may drop sub-microsecond precision
        assert!(stamped.timestamp_micros() >= before.timestamp_micros());
    }

    #[test]
    fn test_format_timestamp_is_fixed_width() {
        let a = DateTime::from_timestamp_micros(1_700_000_000_000_000).unwrap();
        let b = DateTime::from_timestamp_micros(1_700_000_000_123_456).unwrap();

        let fa = format_timestamp(&a);
        let fb = format_timestamp(&b);

        assert_eq!(fa, "2023-11-14T22:13:20.000000Z");
        assert_eq!(fa.len(), fb.len());
        assert!(fa < fb);
    }
}
