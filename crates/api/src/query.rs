//! Lenient parsing of the vibration listing query string.
//!
//! Values that do not parse are treated as absent: filters are dropped and
//! pagination falls back to its defaults.

use chrono::{DateTime, Utc};
use pipesense_core::types::{RecordId, Timestamp};
use pipesense_db::models::vibration::{Page, VibrationFilter};
use serde::Deserialize;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Raw `GET /vibrations` parameters, kept as strings so bad values never
/// reject the request.
#[derive(Debug, Default, Deserialize)]
pub struct VibrationListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sensor_id: Option<String>,
    pub warn_id: Option<String>,
    /// RFC 3339, inclusive.
    pub start_date: Option<String>,
    /// RFC 3339, inclusive.
    pub end_date: Option<String>,
}

impl VibrationListParams {
    /// 1-based page number and page size.
    pub fn pagination(&self) -> (u64, u64) {
        (
            positive_or(self.page.as_deref(), DEFAULT_PAGE),
            positive_or(self.limit.as_deref(), DEFAULT_LIMIT),
        )
    }

    pub fn page(&self) -> Page {
        let (page, limit) = self.pagination();
        Page::new(page, limit)
    }

    pub fn filter(&self) -> VibrationFilter {
        VibrationFilter {
            sensor_id: record_id(self.sensor_id.as_deref()),
            warn_id: record_id(self.warn_id.as_deref()),
            start: timestamp(self.start_date.as_deref()),
            end: timestamp(self.end_date.as_deref()),
        }
    }
}

fn positive_or(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

fn record_id(raw: Option<&str>) -> Option<RecordId> {
    raw.and_then(|s| s.parse().ok())
}

fn timestamp(raw: Option<&str>) -> Option<Timestamp> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> VibrationListParams {
        let mut p = VibrationListParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "page" => p.page = value,
                "limit" => p.limit = value,
                "sensor_id" => p.sensor_id = value,
                "warn_id" => p.warn_id = value,
                "start_date" => p.start_date = value,
                "end_date" => p.end_date = value,
                other => panic!("unknown param {other}"),
            }
        }
        p
    }

    #[test]
    fn pagination_defaults_to_first_page_of_ten() {
        assert_eq!(params(&[]).pagination(), (1, 10));
    }

    #[test]
    fn non_positive_or_garbage_pagination_falls_back() {
        let p = params(&[("page", "0"), ("limit", "-5")]);
        assert_eq!(p.pagination(), (1, 10));
        let p = params(&[("page", "two"), ("limit", "25")]);
        assert_eq!(p.pagination(), (1, 25));
        assert_eq!(p.page(), Page { skip: 0, limit: 25 });
    }

    #[test]
    fn second_page_skips_first_limit_records() {
        let p = params(&[("page", "2"), ("limit", "10")]);
        assert_eq!(p.page(), Page { skip: 10, limit: 10 });
    }

    #[test]
    fn unparsable_filters_are_ignored() {
        let p = params(&[
            ("sensor_id", "nope"),
            ("warn_id", "65f1a2b3c4d5e6f708192a3b"),
            ("start_date", "yesterday"),
            ("end_date", "2024-03-01T12:00:00+07:00"),
        ]);
        let filter = p.filter();
        assert_eq!(filter.sensor_id, None);
        assert_eq!(
            filter.warn_id.map(|id| id.to_hex()).as_deref(),
            Some("65f1a2b3c4d5e6f708192a3b")
        );
        assert_eq!(filter.start, None);
        assert_eq!(
            filter.end.map(|t| t.to_rfc3339()).as_deref(),
            Some("2024-03-01T05:00:00+00:00")
        );
    }
}
