use chrono::Utc;

/// RFC3339 timestamp in UTC (for logs and snapshots).
pub fn iso_timestamp_utc() -> String {
    Utc::now().to_rfc3339()
}
