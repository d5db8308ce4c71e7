use chrono::{DateTime, NaiveDate, Utc};
use feedline_core::{BarDocument, Volume};

/// Collection the daily Shenzhen trade bars live in.
pub const SZ_TRADE_DAILY: &str = "SZ_TRADEBAR_DAILY";

/// Symbol code of the main fixture series.
pub const CODE_000001_SZ: &str = "000001.SZ";

/// A second symbol in the same collection, never requested by the fixture descriptor.
pub const CODE_000002_SZ: &str = "000002.SZ";

// (yyyy-mm-dd, open, high, low, close, volume)
type Row = (&'static str, f64, f64, f64, f64, i64);

// January 1992 sessions; the exchange was shut 3-7 Feb for the Spring Festival.
const SZ_000001: &[Row] = &[
    ("1991-12-31", 28.00, 28.40, 27.90, 28.20, 9_800),
    ("1992-01-02", 28.20, 28.60, 28.10, 28.50, 12_400),
    ("1992-01-03", 28.50, 28.90, 28.30, 28.70, 11_900),
    ("1992-01-06", 28.70, 29.10, 28.60, 29.00, 13_100),
    ("1992-01-07", 29.00, 29.40, 28.80, 29.30, 14_050),
    ("1992-01-08", 29.30, 29.60, 29.10, 29.45, 12_700),
    ("1992-01-09", 29.45, 29.80, 29.20, 29.25, 10_300),
    ("1992-01-10", 29.25, 29.50, 28.95, 29.05, 9_950),
    ("1992-01-13", 29.05, 29.35, 28.90, 29.30, 10_800),
    ("1992-01-14", 29.30, 29.75, 29.25, 29.70, 13_600),
    ("1992-01-15", 29.70, 30.10, 29.55, 30.05, 15_200),
    ("1992-01-16", 30.05, 30.40, 29.90, 30.20, 14_900),
    ("1992-01-17", 30.20, 30.55, 30.00, 30.35, 13_300),
    ("1992-01-20", 30.35, 30.60, 30.10, 30.15, 11_200),
    ("1992-01-21", 30.15, 30.30, 29.80, 29.90, 10_700),
    ("1992-01-22", 29.90, 30.25, 29.75, 30.10, 11_050),
    ("1992-01-23", 30.10, 30.50, 30.05, 30.45, 12_900),
    ("1992-01-24", 30.45, 30.90, 30.40, 30.80, 16_100),
    ("1992-01-27", 30.80, 31.20, 30.70, 31.10, 17_400),
    ("1992-01-28", 31.10, 31.35, 30.85, 30.95, 13_800),
    ("1992-01-29", 30.95, 31.15, 30.60, 30.70, 12_200),
    ("1992-01-30", 30.70, 31.00, 30.55, 30.90, 11_600),
    ("1992-01-31", 30.90, 31.40, 30.85, 31.30, 15_700),
    ("1992-02-10", 31.30, 31.80, 31.20, 31.75, 18_900),
];

const SZ_000002: &[Row] = &[
    ("1992-01-02", 14.10, 14.30, 14.00, 14.25, 7_300),
    ("1992-01-03", 14.25, 14.40, 14.15, 14.20, 6_900),
];

fn day(date: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .expect("valid fixture date")
        .and_time(chrono::NaiveTime::MIN)
        .and_utc()
}

fn build(code: &str, rows: &[Row]) -> Vec<BarDocument> {
    rows.iter()
        .map(|&(date, open, high, low, close, volume)| BarDocument {
            code: code.to_string(),
            trade_date: day(date),
            open,
            high,
            low,
            close,
            volume: Volume::Int(volume),
        })
        .collect()
}

/// Daily bars for `000001.SZ`: 22 sessions inside 1992-01-02..=1992-02-09 plus
/// one on each side of that window.
#[must_use]
pub fn sz_000001() -> Vec<BarDocument> {
    build(CODE_000001_SZ, SZ_000001)
}

/// Daily bars for `000002.SZ`.
#[must_use]
pub fn sz_000002() -> Vec<BarDocument> {
    build(CODE_000002_SZ, SZ_000002)
}
