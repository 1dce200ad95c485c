use log::{error, info};
use simple_logger::SimpleLogger;

use sf_rust::sf_event_sinks::ConsoleEventSink;
use sf_rust::sf_stats::seed_to_hex;
use sf_rust::{SimConfig, SimEngine};

fn main() {
    SimpleLogger::new().init().unwrap();

    info!("starting");

    let config = SimConfig {
        num_routers: 4,
        arrival_probability: 0.5,
        min_packet_size: 100,
        max_packet_size: 500,
        router_capacity: 10,
        bandwidth: 2,
        duration: 25,
        enable_event_logging: true,
        ..Default::default()
    };

    let sink = ConsoleEventSink::new(config.enable_event_logging);
    let mut engine = SimEngine::new(config).with_sink(Box::new(sink));
    if let Some(seed) = engine.seed() {
        info!("seed = {}", seed_to_hex(&seed));
    }

    match engine.run() {
        Ok(summary) => summary.print_summary(),
        Err(e) => {
            error!("simulation aborted: {}", e);
            std::process::exit(1);
        }
    }
}
