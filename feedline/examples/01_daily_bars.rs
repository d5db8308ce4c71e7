mod common;

use feedline::{SourceDispatcher, StreamReader, SubscriptionDescriptor, TransportMedium};
use common::{get_store_connector, init_tracing};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // 1. Dispatcher with a store connector (in-memory when FEEDLINE_EXAMPLES_USE_MOCK is set).
    let dispatcher = SourceDispatcher::builder()
        .store_connector(get_store_connector())
        .on_invalid_source(|ev| {
            println!("invalid source {}: {:?}", ev.descriptor.locator(), ev.cause);
        })
        .build()?;

    // 2. Daily trade bars for 000001.SZ over January 1992.
    let descriptor = SubscriptionDescriptor::new("000001.SZ", TransportMedium::DocumentStore)
        .with_header("date", "19920101 00:00:00")
        .with_header("ticker", "000001 2S1")
        .with_header("market", "sz")
        .with_header("ticktype", "Trade")
        .with_header("resolution", "Daily")
        .with_header("PeriodStart", "19920102")
        .with_header("PeriodFinish", "19920209");

    // 3. Pull every line; an empty window prints the event above instead.
    if let Some(mut reader) = dispatcher.create_stream_reader(&descriptor)? {
        let mut n = 0usize;
        while !reader.end_of_stream() {
            println!("{}", reader.read_line()?);
            n += 1;
        }
        println!("{n} bars");
    }

    Ok(())
}
