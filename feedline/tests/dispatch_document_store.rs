mod helpers;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use feedline::{FeedError, SourceDispatcher, StreamReader, TransportMedium};
use feedline_mock::{ConnectBehavior, MemoryStore, MockConnector, QueryBehavior};
use helpers::{Recorder, SZ_000001, builder_with, daily_descriptor};

fn setup() -> (Arc<MockConnector>, Recorder, SourceDispatcher, tempfile::TempDir) {
    let connector = Arc::new(MockConnector::default());
    let recorder = Recorder::default();
    let dir = tempfile::tempdir().unwrap();
    let dispatcher = builder_with(connector.clone(), &dir, &recorder)
        .build()
        .expect("dispatcher builds");
    (connector, recorder, dispatcher, dir)
}

#[test]
fn daily_window_yields_twenty_two_ascending_lines() {
    let (_c, recorder, dispatcher, _dir) = setup();
    let mut reader = dispatcher
        .create_stream_reader(&daily_descriptor("000001 2S1", "Daily"))
        .unwrap()
        .expect("reader for populated window");

    assert_eq!(reader.transport_medium(), TransportMedium::DocumentStore);
    assert!(!reader.should_rate_limit());

    let lines: Vec<String> = reader.lines().map(Result::unwrap).collect();
    assert_eq!(lines.len(), 22);
    assert_eq!(lines[0], "19920102 00:00,282000,286000,281000,285000,12400");
    assert!(lines[21].starts_with("19920131 00:00,"));

    let dates: Vec<&str> = lines.iter().map(|l| &l[..8]).collect();
    let mut sorted = dates.clone();
    sorted.sort_unstable();
    assert_eq!(dates, sorted);

    assert!(reader.end_of_stream());
    assert!(reader.end_of_stream());
    assert_eq!(reader.read_line(), Err(FeedError::EndOfStream));
    assert!(recorder.events().is_empty());
}

#[test]
fn non_daily_resolution_is_a_configuration_error() {
    let (connector, recorder, dispatcher, _dir) = setup();
    for res in ["Tick", "Second", "Minute", "Hour"] {
        let err = dispatcher
            .create_stream_reader(&daily_descriptor("000001 2S1", res))
            .err()
            .expect("configuration error");
        assert!(matches!(err, FeedError::UnsupportedResolution { .. }), "{err:?}");
    }
    assert!(connector.store().queries().is_empty());
    assert_eq!(connector.connections_created(), 0);
    assert!(recorder.events().is_empty());
}

#[test]
fn missing_header_is_returned_not_raised() {
    let (_c, recorder, dispatcher, _dir) = setup();
    let descriptor = feedline::SubscriptionDescriptor::new(SZ_000001, TransportMedium::DocumentStore)
        .with_header("resolution", "Daily");
    let err = dispatcher.create_stream_reader(&descriptor).err().unwrap();
    assert_eq!(err, FeedError::missing_header("ticker"));
    assert!(recorder.events().is_empty());
}

#[test]
fn empty_window_raises_one_event_without_reader() {
    let (_c, recorder, dispatcher, _dir) = setup();
    let descriptor = daily_descriptor("600000", "Daily");

    let out = dispatcher.create_stream_reader(&descriptor).unwrap();
    assert!(out.is_none());

    let events = recorder.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].descriptor, descriptor);
    assert_eq!(events[0].cause, Some(FeedError::empty_source(SZ_000001)));
}

#[test]
fn failing_query_raises_exactly_one_event_with_original_cause() {
    let (connector, recorder, dispatcher, _dir) = setup();
    let cause = FeedError::query("cursor killed");
    connector
        .store()
        .set_query_behavior("000001.SZ", QueryBehavior::Fail(cause.clone()));

    let out = dispatcher
        .create_stream_reader(&daily_descriptor("000001 2S1", "Daily"))
        .unwrap();
    assert!(out.is_none());

    let events = recorder.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].cause, Some(cause));
}

#[test]
fn refused_connection_is_reported_and_retried_next_time() {
    let (connector, recorder, dispatcher, _dir) = setup();
    connector.set_behavior(ConnectBehavior::Refuse);

    let descriptor = daily_descriptor("000001 2S1", "Daily");
    assert!(dispatcher.create_stream_reader(&descriptor).unwrap().is_none());
    let events = recorder.events();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0].cause, Some(FeedError::Connection { .. })));

    connector.set_behavior(ConnectBehavior::Accept);
    assert!(dispatcher.create_stream_reader(&descriptor).unwrap().is_some());
    assert_eq!(connector.connections_created(), 1);
    assert_eq!(recorder.events().len(), 1);
}

#[test]
fn readers_share_one_connection() {
    let (connector, _r, dispatcher, _dir) = setup();
    for _ in 0..5 {
        let reader = dispatcher
            .create_stream_reader(&daily_descriptor("000001 2S1", "Daily"))
            .unwrap();
        assert!(reader.is_some());
    }
    assert_eq!(connector.connections_created(), 1);
    assert_eq!(connector.store().queries().len(), 5);
}

#[test]
fn concurrent_dispatch_creates_one_connection() {
    let (connector, _r, dispatcher, _dir) = setup();
    let dispatcher = Arc::new(dispatcher);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let d = Arc::clone(&dispatcher);
            std::thread::spawn(move || {
                d.create_stream_reader(&daily_descriptor("000001 2S1", "Daily"))
                    .unwrap()
                    .map(|mut r| r.lines().count())
            })
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), Some(22));
    }
    assert_eq!(connector.connections_created(), 1);
}

#[test]
fn cursor_error_surfaces_on_the_read_that_hits_it() {
    let store = Arc::new(MemoryStore::with_fixtures());
    store.set_query_behavior(
        "000001.SZ",
        QueryBehavior::FailAfterDocuments(FeedError::query("network reset")),
    );
    let connector = Arc::new(MockConnector::new(store));
    let recorder = Recorder::default();
    let dir = tempfile::tempdir().unwrap();
    let dispatcher = builder_with(connector, &dir, &recorder).build().unwrap();

    let mut reader = dispatcher
        .create_stream_reader(&daily_descriptor("000001 2S1", "Daily"))
        .unwrap()
        .unwrap();
    let results: Vec<_> = reader.lines().collect();
    assert_eq!(results.len(), 23);
    assert!(results[..22].iter().all(Result::is_ok));
    assert_eq!(results[22], Err(FeedError::query("network reset")));
    assert!(recorder.events().is_empty());
}

#[test]
fn listeners_run_in_registration_order() {
    let connector = Arc::new(MockConnector::default());
    let dir = tempfile::tempdir().unwrap();
    let order = Arc::new(std::sync::Mutex::new(Vec::new()));
    let calls = Arc::new(AtomicUsize::new(0));

    let (o1, o2) = (order.clone(), order.clone());
    let dispatcher = SourceDispatcher::builder()
        .store_connector(connector)
        .remote_cache(helpers::temp_cache(&dir))
        .on_invalid_source(move |_| o1.lock().unwrap().push("first"))
        .on_invalid_source(move |_| o2.lock().unwrap().push("second"))
        .build()
        .unwrap();
    let c = calls.clone();
    dispatcher.on_invalid_source(move |_| {
        c.fetch_add(1, Ordering::SeqCst);
    });

    let out = dispatcher
        .create_stream_reader(&daily_descriptor("600000", "Daily"))
        .unwrap();
    assert!(out.is_none());
    assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn listener_may_register_another_listener() {
    let (_c, _r, dispatcher, _dir) = setup();
    let dispatcher = Arc::new(dispatcher);
    let late = Arc::new(AtomicUsize::new(0));

    let (d, l) = (Arc::downgrade(&dispatcher), late.clone());
    dispatcher.on_invalid_source(move |_| {
        if let Some(d) = d.upgrade() {
            let l = l.clone();
            d.on_invalid_source(move |_| {
                l.fetch_add(1, Ordering::SeqCst);
            });
        }
    });

    let descriptor = daily_descriptor("600000", "Daily");
    assert!(dispatcher.create_stream_reader(&descriptor).unwrap().is_none());
    assert_eq!(late.load(Ordering::SeqCst), 0);
    assert!(dispatcher.create_stream_reader(&descriptor).unwrap().is_none());
    assert_eq!(late.load(Ordering::SeqCst), 1);
}

#[test]
fn error_on_first_cursor_item_raises_one_event_without_reader() {
    let (connector, recorder, dispatcher, _dir) = setup();
    let cause = FeedError::Data("missing field 'open'".into());
    // 600000.SZ has no fixture bars, so the error is the only cursor item.
    connector
        .store()
        .set_query_behavior("600000.SZ", QueryBehavior::FailAfterDocuments(cause.clone()));

    let descriptor = daily_descriptor("600000", "Daily");
    let out = dispatcher.create_stream_reader(&descriptor).unwrap();
    assert!(out.is_none());

    let events = recorder.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].descriptor, descriptor);
    assert_eq!(events[0].cause, Some(cause));
}

#[test]
fn duplicate_header_is_a_configuration_error() {
    let (connector, recorder, dispatcher, _dir) = setup();
    let descriptor = daily_descriptor("000001 2S1", "Daily").with_header("ticker", "000002");

    let err = dispatcher.create_stream_reader(&descriptor).err().unwrap();
    assert_eq!(err, FeedError::invalid_header("ticker", "duplicate key"));
    assert!(recorder.events().is_empty());
    assert_eq!(connector.connections_created(), 0);
}
