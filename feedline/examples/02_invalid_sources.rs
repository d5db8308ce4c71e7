mod common;

use feedline::{SourceDispatcher, SubscriptionDescriptor, TransportMedium};
use common::{get_store_connector, init_tracing};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let dispatcher = SourceDispatcher::builder()
        .store_connector(get_store_connector())
        .on_invalid_source(|ev| {
            println!(
                "[{}] {} -> {}",
                ev.descriptor.transport_medium(),
                ev.descriptor.locator(),
                ev.cause
                    .as_ref()
                    .map_or_else(|| "no cause".to_string(), ToString::to_string)
            );
        })
        .build()?;

    // Sources that cannot produce data are reported, never fatal.
    let sources = [
        SubscriptionDescriptor::new("/nonexistent/feed.csv", TransportMedium::LocalFile),
        SubscriptionDescriptor::new("600000.SZ", TransportMedium::DocumentStore)
            .with_header("date", "19920101 00:00:00")
            .with_header("ticker", "600000")
            .with_header("market", "sz")
            .with_header("ticktype", "Trade")
            .with_header("resolution", "Daily")
            .with_header("PeriodStart", "19920102")
            .with_header("PeriodFinish", "19920209"),
    ];
    for descriptor in &sources {
        let reader = dispatcher.create_stream_reader(descriptor)?;
        println!("{}: reader = {}", descriptor.locator(), reader.is_some());
    }

    // A minute-resolution request is a caller bug and comes back as an error.
    let minute = SubscriptionDescriptor::new("000001.SZ", TransportMedium::DocumentStore)
        .with_header("resolution", "Minute");
    match dispatcher.create_stream_reader(&minute) {
        Err(e) => println!("configuration error: {e}"),
        Ok(_) => println!("unexpected reader"),
    }

    Ok(())
}
