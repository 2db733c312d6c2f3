use crate::util::human::fmt_bytes;
use chrono::{DateTime, Local};
use serde::Serialize;

/// Timestamp layout used for the `timestamp` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Raw capacity numbers for the filesystem holding a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capacity {
    pub total_bytes: u64,
    pub used_bytes:  u64,
    /// Space available to unprivileged users, not the raw free block count.
    pub free_bytes:  u64,
}

impl Capacity {
    /// Free space as a percentage of total, unrounded. Rounding happens once,
    /// when the value is formatted. A zero-sized filesystem reports 0.
    pub fn free_pct(&self) -> f64 {
        if self.total_bytes == 0 { return 0.0; }
        self.free_bytes as f64 / self.total_bytes as f64 * 100.0
    }
}

/// One recorded observation. Field names double as the CSV header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageSample {
    pub timestamp:    String,
    /// The queried path as given. Non-UTF-8 bytes are replaced with U+FFFD,
    /// so such paths are not reproduced byte-for-byte.
    pub path:         String,
    pub total_bytes:  u64,
    pub used_bytes:   u64,
    pub free_bytes:   u64,
    /// Unrounded; written with two decimals.
    #[serde(serialize_with = "two_decimals")]
    pub free_percent: f64,
    pub total_human:  String,
    pub used_human:   String,
    pub free_human:   String,
}

impl UsageSample {
    pub fn new(at: &DateTime<Local>, path: &str, cap: Capacity) -> Self {
        Self {
            timestamp:    at.format(TIMESTAMP_FORMAT).to_string(),
            path:         path.to_string(),
            total_bytes:  cap.total_bytes,
            used_bytes:   cap.used_bytes,
            free_bytes:   cap.free_bytes,
            free_percent: cap.free_pct(),
            total_human:  fmt_bytes(cap.total_bytes),
            used_human:   fmt_bytes(cap.used_bytes),
            free_human:   fmt_bytes(cap.free_bytes),
        }
    }

    /// `free_percent` as written to the log: always two fractional digits.
    pub fn free_percent_str(&self) -> String {
        format!("{:.2}", self.free_percent)
    }
}

fn two_decimals<S: serde::Serializer>(pct: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&format_args!("{:.2}", pct))
}
