//! Basic store-and-forward simulation
//!
//! Run with: cargo run --example basic_simulation

use log::info;
use simple_logger::SimpleLogger;

use sf_rust::sf_event_sinks::ConsoleEventSink;
use sf_rust::{SimConfig, SimEngine};

fn main() {
    SimpleLogger::new().init().unwrap();

    info!("Setting up simulation...");

    let config = SimConfig {
        num_routers: 3,
        arrival_probability: 0.4,
        min_packet_size: 100,
        max_packet_size: 400,
        max_packets_per_tick: 3,
        router_capacity: 4,
        bandwidth: 1,
        duration: 30,
        seed: None, // Will be auto-generated
        enable_event_logging: true,
    };

    info!("Starting simulation...");

    let sink = Box::new(ConsoleEventSink::new(config.enable_event_logging));
    let mut engine = SimEngine::new(config).with_sink(sink);
    let summary = engine.run().expect("simulation aborted");

    summary.print_summary();

    info!(
        "delivered {} of {} generated ({} dropped, {} still queued)",
        summary.total_delivered, summary.total_generated, summary.total_dropped, summary.in_flight
    );
}
