//! Text rendering of stored bars into the line format consumed downstream.

use feedline_types::{FeedError, Resolution};

use crate::store::BarDocument;

/// Fixed-point factor applied to prices: the record parser divides by it.
pub const SCALE_FACTOR: f64 = 10_000.0;

/// Render one daily bar as
/// `yyyyMMdd 00:00,open,high,low,close,volume`.
///
/// Prices are multiplied by [`SCALE_FACTOR`] with plain `f64` arithmetic and
/// printed in shortest round-trip form; volume is printed as stored.
#[must_use]
pub fn render_daily_line(doc: &BarDocument) -> String {
    format!(
        "{} 00:00,{},{},{},{},{}",
        doc.trade_date.format("%Y%m%d"),
        doc.open * SCALE_FACTOR,
        doc.high * SCALE_FACTOR,
        doc.low * SCALE_FACTOR,
        doc.close * SCALE_FACTOR,
        doc.volume,
    )
}

/// Render `doc` for `resolution`.
///
/// # Errors
/// `UnsupportedResolution` for anything but `Daily`.
pub fn render_line(resolution: Resolution, doc: &BarDocument) -> Result<String, FeedError> {
    match resolution {
        Resolution::Daily => Ok(render_daily_line(doc)),
        other => Err(FeedError::unsupported_resolution(other.as_str())),
    }
}
