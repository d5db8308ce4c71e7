//! Query windows derived from subscription headers.

use chrono::{DateTime, NaiveDate, Utc};
use feedline_types::{FeedError, Headers, Resolution};

use crate::store::BarQuery;

/// Header keys consumed by document-store readers.
pub mod keys {
    /// Bar resolution, e.g. `Daily`.
    pub const RESOLUTION: &str = "resolution";
    /// Ticker; only the first space-separated token is used.
    pub const TICKER: &str = "ticker";
    /// Market code, e.g. `sz`.
    pub const MARKET: &str = "market";
    /// Tick type, e.g. `Trade`.
    pub const TICK_TYPE: &str = "ticktype";
    /// Current subscription date.
    pub const DATE: &str = "date";
    /// First session of the window, `yyyyMMdd`.
    pub const PERIOD_START: &str = "PeriodStart";
    /// Last session of the window, `yyyyMMdd`.
    pub const PERIOD_FINISH: &str = "PeriodFinish";
}

const PERIOD_FORMAT: &str = "%Y%m%d";

/// Symbol, inclusive date window and resolution of one subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWindow {
    /// Upper-cased `<first ticker token>.<market>`.
    pub symbol_code: String,
    /// First session included.
    pub period_start: NaiveDate,
    /// Last session included.
    pub period_finish: NaiveDate,
    /// Requested resolution.
    pub resolution: Resolution,
    /// Raw `date` header.
    pub as_of: String,
}

impl QueryWindow {
    /// Parse the window from subscription headers.
    ///
    /// # Errors
    /// `MissingHeader` for an absent key, `InvalidHeader` for an unparseable
    /// resolution or period bound.
    pub fn from_headers(headers: &Headers) -> Result<Self, FeedError> {
        let resolution = headers.require(keys::RESOLUTION)?.parse()?;
        let ticker = headers.require(keys::TICKER)?;
        let market = headers.require(keys::MARKET)?;
        headers.require(keys::TICK_TYPE)?;
        let as_of = headers.require(keys::DATE)?.to_string();
        let period_start = parse_period(headers, keys::PERIOD_START)?;
        let period_finish = parse_period(headers, keys::PERIOD_FINISH)?;

        Ok(Self {
            symbol_code: symbol_code(ticker, market),
            period_start,
            period_finish,
            resolution,
            as_of,
        })
    }

    /// The store filter covering this window.
    #[must_use]
    pub fn bar_query(&self) -> BarQuery {
        BarQuery {
            code: self.symbol_code.clone(),
            start: midnight_utc(self.period_start),
            finish: midnight_utc(self.period_finish),
        }
    }
}

/// `uppercase(first_token(ticker) + "." + market)`.
#[must_use]
pub fn symbol_code(ticker: &str, market: &str) -> String {
    let head = ticker.split(' ').next().unwrap_or_default();
    format!("{head}.{market}").to_uppercase()
}

/// Collection holding bars for `headers`, e.g. `SZ_TRADEBAR_DAILY`.
///
/// # Errors
/// `UnsupportedResolution` for anything but `Daily`; `MissingHeader` if
/// `market` or `ticktype` is absent.
pub fn collection_name(headers: &Headers, resolution: Resolution) -> Result<String, FeedError> {
    if resolution != Resolution::Daily {
        return Err(FeedError::unsupported_resolution(
            headers.get(keys::RESOLUTION).unwrap_or(resolution.as_str()),
        ));
    }
    let market = headers.require(keys::MARKET)?;
    let tick_type = headers.require(keys::TICK_TYPE)?;
    Ok(format!("{market}_{tick_type}BAR_{resolution}").to_uppercase())
}

fn parse_period(headers: &Headers, key: &str) -> Result<NaiveDate, FeedError> {
    let raw = headers.require(key)?;
    NaiveDate::parse_from_str(raw, PERIOD_FORMAT).map_err(|_| FeedError::invalid_header(key, raw))
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}
