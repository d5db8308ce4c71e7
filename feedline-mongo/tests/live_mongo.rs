//! Runs against a real MongoDB seeded with `SZ_TRADEBAR_DAILY` bars.
//!
//! `cargo test -p feedline-mongo -- --ignored` with a server on localhost:27017.

use feedline_core::{DocumentStoreReader, Headers, StoreConnector, StreamReader};
use feedline_mongo::MongoConnector;

fn headers() -> Headers {
    [
        ("date", "19920101 00:00:00"),
        ("ticker", "000001 2S1"),
        ("market", "sz"),
        ("ticktype", "Trade"),
        ("resolution", "Daily"),
        ("PeriodStart", "19920102"),
        ("PeriodFinish", "19920209"),
    ]
    .into_iter()
    .collect()
}

#[test]
#[ignore = "requires a seeded MongoDB on localhost:27017"]
fn reads_22_daily_lines() {
    let connector = MongoConnector::with_address("localhost", 27017);
    let mut reader = DocumentStoreReader::create(&connector, &headers()).unwrap();

    let mut lines = Vec::new();
    while !reader.end_of_stream() {
        lines.push(reader.read_line().unwrap());
    }
    assert_eq!(lines.len(), 22);
    assert!(lines.windows(2).all(|w| w[0][..8] <= w[1][..8]));
}

#[test]
#[ignore = "requires a MongoDB on localhost:27017"]
fn connector_hands_out_one_shared_store() {
    let connector = MongoConnector::with_address("localhost", 27017);
    let a = connector.connect().unwrap();
    let b = connector.connect().unwrap();
    assert!(std::sync::Arc::ptr_eq(&a, &b));
}
