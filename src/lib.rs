//! # sfRust - Store-and-Forward Network Simulator
//!
//! A discrete-time simulation of packets flowing through a small store-and-forward
//! network: packets arrive at a dispatcher, are load-balanced across a fixed pool of
//! capacity-bounded routers, age while they sit at the head of their router, and are
//! admitted by the destination at a limited rate per tick.
//!
//! ## Core Components
//!
//! - **SimEngine**: tick pipeline (arrivals, routing, ready collection, admission, aging)
//! - **Router / RouterPool**: bounded FIFO queues with stable indices
//! - **RouterSelector**: load-balancing policy, least loaded router by default
//! - **PacketSource**: pluggable arrivals, seeded random or a fixed schedule
//! - **EventSink**: per-tick event reporting (console, CSV, in-memory)
//!
//! ```no_run
//! use sf_rust::{SimConfig, SimEngine};
//! use sf_rust::sf_event_sinks::ConsoleEventSink;
//!
//! let config = SimConfig {
//!     num_routers: 3,
//!     router_capacity: 4,
//!     bandwidth: 2,
//!     duration: 20,
//!     ..Default::default()
//! };
//!
//! let mut engine = SimEngine::new(config).with_sink(Box::new(ConsoleEventSink::new(true)));
//! let summary = engine.run().expect("simulation failed");
//! summary.print_summary();
//! ```

pub mod sf_interface;
pub mod sf_packet;
pub mod sf_router;
pub mod sf_selector;
pub mod sf_dispatcher;
pub mod sf_generator;
pub mod sf_config;
pub mod sf_stats;
pub mod sf_engine;
pub mod sf_event_sinks;

// Re-export commonly used types
pub use sf_config::{ConfigError, SimConfig};
pub use sf_engine::{SimEngine, SimError};
pub use sf_generator::{PacketSource, RandomSource, ScheduledSource};
pub use sf_interface::{Event, EventSink, NoOpSink, PacketId, RouterIndex, Tick};
pub use sf_packet::Packet;
pub use sf_router::{Router, RouterError, RouterPool};
pub use sf_selector::{Congestion, LeastLoadedSelector, RouterSelector};
pub use sf_stats::{RunStatistics, RunSummary};
