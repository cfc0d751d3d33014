use chrono::{DateTime, Utc};
use rand::Rng;
use rand::rngs::ThreadRng;

/// Prefix used when no (or a blank) prefix is configured.
pub const DEFAULT_INVOICE_PREFIX: &str = "PT";

/// Format an invoice number as `{prefix}-{6 digits}{2 digits}`.
///
/// The first six digits are the low-order digits of `epoch_millis`, the last
/// two are `random` (taken modulo 100), both zero-padded.
pub fn format_invoice_number(prefix: &str, epoch_millis: i64, random: u8) -> String {
    let stamp = epoch_millis.rem_euclid(1_000_000);
    format!("{prefix}-{stamp:06}{:02}", random % 100)
}

/// Generate an invoice number from the wall clock and the thread RNG.
///
/// Numbers are not guaranteed unique: two invoices created in the same
/// millisecond bucket collide with probability 1/100.
pub fn generate_invoice_number(prefix: &str) -> String {
    InvoiceNumberGenerator::new(prefix).next_number(Utc::now())
}

/// Invoice number generator with a configurable prefix and random source.
///
/// Generates numbers such as "PT-84213307": the prefix, a hyphen, six
/// digits of the creation timestamp in milliseconds and a two-digit random
/// suffix.
#[derive(Debug, Clone)]
pub struct InvoiceNumberGenerator<R = ThreadRng> {
    prefix: String,
    rng: R,
}

impl InvoiceNumberGenerator<ThreadRng> {
    /// Generator using the thread-local RNG. A blank prefix falls back to
    /// [`DEFAULT_INVOICE_PREFIX`].
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::with_rng(prefix, rand::thread_rng())
    }
}

impl<R: Rng> InvoiceNumberGenerator<R> {
    pub fn with_rng(prefix: impl Into<String>, rng: R) -> Self {
        let prefix = prefix.into();
        let prefix = if prefix.trim().is_empty() {
            DEFAULT_INVOICE_PREFIX.to_string()
        } else {
            prefix.trim().to_string()
        };
        Self { prefix, rng }
    }

    /// Generate the number for an invoice created at `at`.
    pub fn next_number(&mut self, at: DateTime<Utc>) -> String {
        let random: u8 = self.rng.gen_range(0..100);
        format_invoice_number(&self.prefix, at.timestamp_millis(), random)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn format_takes_low_order_digits() {
        assert_eq!(format_invoice_number("PT", 1_704_067_212_345, 7), "PT-21234507");
        assert_eq!(format_invoice_number("INV", 1_000_000_000_042, 99), "INV-00004299");
    }

    #[test]
    fn generated_number_shape() {
        let mut generator = InvoiceNumberGenerator::with_rng("PT", StdRng::seed_from_u64(42));
        let at = Utc.timestamp_millis_opt(1_704_067_212_345).unwrap();
        for _ in 0..50 {
            let number = generator.next_number(at);
            let (prefix, digits) = number.split_once('-').unwrap();
            assert_eq!(prefix, "PT");
            assert_eq!(digits.len(), 8);
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
            assert!(digits.starts_with("212345"));
        }
    }

    #[test]
    fn blank_prefix_uses_default() {
        let generator = InvoiceNumberGenerator::new("  ");
        assert_eq!(generator.prefix(), DEFAULT_INVOICE_PREFIX);
    }

    #[test]
    fn wall_clock_generation() {
        let number = generate_invoice_number("ACME");
        assert!(number.starts_with("ACME-"));
        assert_eq!(number.len(), "ACME-".len() + 8);
    }
}
