// src/common/ids.rs

use chrono::{DateTime, Utc};

// Identificadores exibíveis no padrão PREFIXO-AAAAMMDD-NNNN, onde NNNN são
// os quatro últimos dígitos do timestamp em milissegundos.
pub fn generate_display_id(prefix: &str, now: DateTime<Utc>) -> String {
    let date = now.format("%Y%m%d");
    let suffix = now.timestamp_millis().rem_euclid(10_000);
    format!("{}-{}-{:04}", prefix, date, suffix)
}

pub fn generate_quote_id(now: DateTime<Utc>) -> String {
    generate_display_id("QUO", now)
}

pub fn generate_order_id(now: DateTime<Utc>) -> String {
    generate_display_id("ORD", now)
}

pub fn generate_service_request_id(now: DateTime<Utc>) -> String {
    generate_display_id("SR", now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn display_id_has_date_and_four_digit_suffix() {
        let now = Utc.with_ymd_and_hms(2026, 8, 8, 14, 30, 0).unwrap();
        let id = generate_quote_id(now);
        assert!(id.starts_with("QUO-20260808-"));
        let suffix = id.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 4);
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn suffix_is_zero_padded() {
        // Timestamp terminando em ...0007 força o padding
        let now = Utc.timestamp_millis_opt(1_700_000_000_007).unwrap();
        let id = generate_order_id(now);
        assert!(id.ends_with("-0007"), "id gerado: {}", id);
    }

    #[test]
    fn prefixes_differ_per_entity() {
        let now = Utc.with_ymd_and_hms(2026, 8, 8, 0, 0, 0).unwrap();
        assert!(generate_quote_id(now).starts_with("QUO-"));
        assert!(generate_order_id(now).starts_with("ORD-"));
        assert!(generate_service_request_id(now).starts_with("SR-"));
    }
}
