//! BSON document to [`BarDocument`] conversion.

use chrono::{DateTime, Utc};
use feedline_core::{BarDocument, FeedError, Volume};
use mongodb::bson::{Bson, Document};

/// Decode one stored daily bar.
///
/// Prices accept any numeric BSON type; volume keeps its stored kind so it
/// renders unmodified.
pub(crate) fn decode_bar(doc: &Document) -> Result<BarDocument, FeedError> {
    let code = doc
        .get_str("code")
        .map_err(|e| FeedError::Data(format!("field 'code': {e}")))?
        .to_string();
    let millis = doc
        .get_datetime("trade_date")
        .map_err(|e| FeedError::Data(format!("field 'trade_date': {e}")))?
        .timestamp_millis();
    let trade_date = DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| FeedError::Data(format!("trade_date out of range: {millis}")))?;

    Ok(BarDocument {
        code,
        trade_date,
        open: price(doc, "open")?,
        high: price(doc, "high")?,
        low: price(doc, "low")?,
        close: price(doc, "close")?,
        volume: volume(doc)?,
    })
}

fn price(doc: &Document, key: &str) -> Result<f64, FeedError> {
    match doc.get(key) {
        Some(Bson::Double(v)) => Ok(*v),
        Some(Bson::Int32(v)) => Ok(f64::from(*v)),
        #[allow(clippy::cast_precision_loss)]
        Some(Bson::Int64(v)) => Ok(*v as f64),
        Some(other) => Err(FeedError::Data(format!(
            "field '{key}' is not numeric: {other}"
        ))),
        None => Err(FeedError::Data(format!("missing field '{key}'"))),
    }
}

fn volume(doc: &Document) -> Result<Volume, FeedError> {
    match doc.get("volume") {
        Some(Bson::Int32(v)) => Ok(Volume::Int(i64::from(*v))),
        Some(Bson::Int64(v)) => Ok(Volume::Int(*v)),
        Some(Bson::Double(v)) => Ok(Volume::Float(*v)),
        Some(other) => Err(FeedError::Data(format!(
            "field 'volume' is not numeric: {other}"
        ))),
        None => Err(FeedError::Data("missing field 'volume'".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{DateTime as BsonDateTime, doc};

    fn jan2() -> BsonDateTime {
        // 1992-01-02T00:00:00Z
        BsonDateTime::from_millis(694_310_400_000)
    }

    #[test]
    fn decodes_daily_bar() {
        let d = doc! {
            "code": "000001.SZ",
            "trade_date": jan2(),
            "open": 28.2,
            "high": 28.6,
            "low": 28.1,
            "close": 28.5,
            "volume": 12_400_i64,
        };
        let bar = decode_bar(&d).unwrap();
        assert_eq!(bar.code, "000001.SZ");
        assert_eq!(bar.trade_date.format("%Y%m%d").to_string(), "19920102");
        assert_eq!(bar.open, 28.2);
        assert_eq!(bar.volume, Volume::Int(12_400));
    }

    #[test]
    fn integer_prices_and_float_volume() {
        let d = doc! {
            "code": "000001.SZ",
            "trade_date": jan2(),
            "open": 28_i32,
            "high": 29_i64,
            "low": 27.5,
            "close": 28.0,
            "volume": 1.5e6,
        };
        let bar = decode_bar(&d).unwrap();
        assert_eq!(bar.open, 28.0);
        assert_eq!(bar.high, 29.0);
        assert_eq!(bar.volume, Volume::Float(1.5e6));
    }

    #[test]
    fn missing_and_mistyped_fields_are_data_errors() {
        let missing = doc! { "code": "X", "trade_date": jan2(), "open": 1.0 };
        assert!(matches!(decode_bar(&missing), Err(FeedError::Data(_))));

        let wrong = doc! {
            "code": "X",
            "trade_date": "1992-01-02",
            "open": 1.0, "high": 1.0, "low": 1.0, "close": 1.0, "volume": 1_i32,
        };
        let err = decode_bar(&wrong).unwrap_err();
        assert!(matches!(err, FeedError::Data(ref m) if m.contains("trade_date")));
    }
}
