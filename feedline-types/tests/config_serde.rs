use feedline_types::{FeedConfig, FeedError, StoreConfig};

#[test]
fn store_config_accepts_legacy_keys() {
    let cfg: StoreConfig =
        serde_json::from_str(r#"{"mongo-ip":"10.0.0.7","mongo-port":27018}"#).unwrap();
    assert_eq!(cfg.host, "10.0.0.7");
    assert_eq!(cfg.port, 27018);
    assert_eq!(cfg.database, "quant");
    assert_eq!(cfg.uri(), "mongodb://10.0.0.7:27018");
}

#[test]
fn feed_config_missing_fields_take_defaults() {
    let cfg = FeedConfig::from_json_str(r#"{"live_mode":true}"#).unwrap();
    assert!(cfg.live_mode);
    assert_eq!(cfg.store, StoreConfig::default());
    assert_eq!(cfg.http_timeout.as_secs(), 30);
    assert_eq!(cfg.remote_cache.max_entries, 256);
}

#[test]
fn feed_config_roundtrip() {
    let mut cfg = FeedConfig::default();
    cfg.store.host = "db.internal".into();
    cfg.remote_cache.ttl = std::time::Duration::from_secs(90);

    let json = serde_json::to_string(&cfg).expect("serialize feed config");
    let de = FeedConfig::from_json_str(&json).expect("deserialize feed config");
    assert_eq!(de, cfg);
}

#[test]
fn malformed_config_is_a_configuration_error() {
    let err = FeedConfig::from_json_str("{not json").unwrap_err();
    assert!(matches!(err, FeedError::Config(_)));
    assert!(err.is_configuration());
}
