mod helpers;

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use feedline::{FeedError, StreamReader, SubscriptionDescriptor, TransportMedium};
use feedline_mock::MockConnector;
use helpers::{Recorder, builder_with};
use proptest::prelude::*;

fn descriptor(start: NaiveDate, finish: NaiveDate) -> SubscriptionDescriptor {
    SubscriptionDescriptor::new("000001.SZ", TransportMedium::DocumentStore)
        .with_header("date", "19920101 00:00:00")
        .with_header("ticker", "000001 2S1")
        .with_header("market", "sz")
        .with_header("ticktype", "Trade")
        .with_header("resolution", "Daily")
        .with_header("PeriodStart", start.format("%Y%m%d").to_string())
        .with_header("PeriodFinish", finish.format("%Y%m%d").to_string())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn lines_stay_inside_the_window_in_ascending_order(
        start_off in 0i64..50,
        len in 0i64..50,
    ) {
        let base = NaiveDate::from_ymd_opt(1991, 12, 25).unwrap();
        let start = base + Duration::days(start_off);
        let finish = start + Duration::days(len);

        let dir = tempfile::tempdir().unwrap();
        let recorder = Recorder::default();
        let dispatcher = builder_with(Arc::new(MockConnector::default()), &dir, &recorder)
            .build()
            .unwrap();

        match dispatcher.create_stream_reader(&descriptor(start, finish)).unwrap() {
            Some(mut reader) => {
                let dates: Vec<NaiveDate> = reader
                    .lines()
                    .map(|l| NaiveDate::parse_from_str(&l.unwrap()[..8], "%Y%m%d").unwrap())
                    .collect();
                prop_assert!(!dates.is_empty());
                prop_assert!(dates.windows(2).all(|w| w[0] <= w[1]));
                prop_assert!(dates.iter().all(|d| *d >= start && *d <= finish));
                prop_assert!(recorder.events().is_empty());
            }
            None => {
                let events = recorder.events();
                prop_assert_eq!(events.len(), 1);
                prop_assert_eq!(
                    events[0].cause.clone(),
                    Some(FeedError::empty_source("000001.SZ"))
                );
            }
        }
    }
}
