//! Discrete-time store-and-forward engine.
//!
//! Each tick runs five phases to completion, in order:
//! arrivals -> routing -> ready collection -> destination admission -> aging.
//! The engine owns every queue, the id allocator and the statistics for the
//! duration of a run.

use log::{debug, info, warn};
use thiserror::Error;

use crate::sf_config::SimConfig;
use crate::sf_dispatcher::Dispatcher;
use crate::sf_generator::{PacketGenerator, PacketSource, RandomSource};
use crate::sf_interface::{Event, EventSink, NoOpSink, PacketId, RouterIndex, Tick};
use crate::sf_packet::PacketIdAllocator;
use crate::sf_router::{RouterError, RouterPool};
use crate::sf_selector::{LeastLoadedSelector, RouterSelector};
use crate::sf_stats::{RunStatistics, RunSummary};

/// Fatal conditions; any of these ends the run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error(transparent)]
    Router(#[from] RouterError),
    #[error("router {0} does not exist")]
    UnknownRouter(RouterIndex),
    #[error("router {router} head is {found:?}, expected packet {expected}")]
    HeadMismatch {
        router: RouterIndex,
        expected: PacketId,
        found: Option<PacketId>,
    },
}

/// A router head waiting for the destination, with its owning router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ReadyPacket {
    router: RouterIndex,
    packet_id: PacketId,
}

/// Simulation engine that executes the tick pipeline
pub struct SimEngine {
    config: SimConfig,
    seed: Option<[u8; 32]>,
    ids: PacketIdAllocator,
    dispatcher: Dispatcher,
    routers: RouterPool,
    generator: PacketGenerator,
    selector: Box<dyn RouterSelector>,
    stats: RunStatistics,
    event_sink: Box<dyn EventSink>,
}

impl SimEngine {
    /// Engine with random arrivals drawn from the configured (or a fresh) seed
    pub fn new(config: SimConfig) -> Self {
        let seed = config.resolve_seed();
        let source = RandomSource::from_config(&config, seed);
        let mut engine = Self::with_source(config, Box::new(source));
        engine.seed = Some(seed);
        engine
    }

    /// Engine driven by an arbitrary packet source
    pub fn with_source(config: SimConfig, source: Box<dyn PacketSource>) -> Self {
        let routers = RouterPool::new(config.num_routers, config.router_capacity);
        Self {
            config,
            seed: None,
            ids: PacketIdAllocator::new(),
            dispatcher: Dispatcher::new(),
            routers,
            generator: PacketGenerator::new(source),
            selector: Box::new(LeastLoadedSelector),
            stats: RunStatistics::default(),
            event_sink: Box::new(NoOpSink),
        }
    }

    pub fn with_sink(mut self, event_sink: Box<dyn EventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    pub fn with_selector(mut self, selector: Box<dyn RouterSelector>) -> Self {
        self.selector = selector;
        self
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn seed(&self) -> Option<[u8; 32]> {
        self.seed
    }

    pub fn routers(&self) -> &RouterPool {
        &self.routers
    }

    pub fn statistics(&self) -> &RunStatistics {
        &self.stats
    }

    /// Run the complete simulation and return the summary
    pub fn run(&mut self) -> Result<RunSummary, SimError> {
        self.reset();
        info!(
            "simulating {} ticks over {} routers (capacity {}, bandwidth {})",
            self.config.duration,
            self.routers.len(),
            self.routers.capacity(),
            self.config.bandwidth
        );

        for tick in 1..=self.config.duration {
            self.step(tick)?;
        }

        let summary = RunSummary::from_statistics(
            &self.stats,
            self.routers.queued() as u64,
            self.config.duration,
            self.seed,
        );
        if summary.total_delivered == 0 {
            info!("no packets reached the destination");
        }
        info!(
            "run complete: delivered {} dropped {} in flight {}",
            summary.total_delivered, summary.total_dropped, summary.in_flight
        );

        // next run numbers packets from 1 again
        self.ids.reset();
        Ok(summary)
    }

    /// Put the engine back in its start-of-run state
    pub fn reset(&mut self) {
        self.ids.reset();
        self.dispatcher.clear();
        self.routers = RouterPool::new(self.config.num_routers, self.config.router_capacity);
        self.generator.reset();
        self.stats = RunStatistics::default();
    }

    /// Execute one tick
    pub fn step(&mut self, tick: Tick) -> Result<(), SimError> {
        self.event_sink.log(tick, Event::TickStarted);

        self.generate_arrivals(tick);
        self.route_packets(tick)?;
        let ready = self.collect_ready();
        let delivered = self.admit_ready(tick, &ready)?;
        self.report_routers(tick);
        self.age_heads(&delivered);

        Ok(())
    }

    fn generate_arrivals(&mut self, tick: Tick) {
        let packets = self.generator.generate(tick, &mut self.ids);
        if packets.is_empty() {
            self.event_sink.log(tick, Event::NoArrivals);
            return;
        }

        for packet in packets {
            self.stats.record_arrival();
            self.event_sink.log(
                tick,
                Event::PacketArrived {
                    packet_id: packet.id(),
                    size: packet.size(),
                },
            );
            self.dispatcher.enqueue(packet);
        }
    }

    /// Drain the dispatcher: each packet goes to the selected router or is dropped
    fn route_packets(&mut self, tick: Tick) -> Result<(), SimError> {
        let mut dropped = 0;

        while !self.dispatcher.is_empty() {
            let selection = self
                .selector
                .select(self.routers.routers(), self.routers.capacity());

            match selection {
                Ok(index) => {
                    let packet = self.dispatcher.dequeue()?;
                    let packet_id = packet.id();
                    self.routers
                        .get_mut(index)
                        .ok_or(SimError::UnknownRouter(index))?
                        .enqueue(packet)?;

                    debug!("{}: packet {} -> router {}", tick, packet_id, index);
                    self.event_sink
                        .log(tick, Event::PacketRouted { packet_id, router: index });
                }
                Err(congestion) => {
                    let packet = self.dispatcher.dequeue()?;
                    self.stats.record_drop();
                    dropped += 1;

                    debug!("{}: packet {} dropped, {}", tick, packet.id(), congestion);
                    self.event_sink.log(
                        tick,
                        Event::PacketDropped {
                            packet_id: packet.id(),
                        },
                    );
                }
            }
        }

        if dropped > 0 {
            warn!("{}: network congested, {} packets dropped", tick, dropped);
        }
        Ok(())
    }

    /// Ready heads in router index order, which is the delivery priority
    fn collect_ready(&self) -> Vec<ReadyPacket> {
        self.routers
            .iter()
            .enumerate()
            .filter_map(|(router, r)| {
                r.peek()
                    .filter(|head| head.is_ready())
                    .map(|head| ReadyPacket {
                        router,
                        packet_id: head.id(),
                    })
            })
            .collect()
    }

    /// Admit up to `bandwidth` ready packets. Returns which routers delivered.
    fn admit_ready(&mut self, tick: Tick, ready: &[ReadyPacket]) -> Result<Vec<bool>, SimError> {
        let mut delivered = vec![false; self.routers.len()];

        for entry in ready.iter().take(self.config.bandwidth) {
            let router = self
                .routers
                .get_mut(entry.router)
                .ok_or(SimError::UnknownRouter(entry.router))?;

            let head = router.head_id();
            if head != Some(entry.packet_id) {
                return Err(SimError::HeadMismatch {
                    router: entry.router,
                    expected: entry.packet_id,
                    found: head,
                });
            }

            let packet = router.dequeue()?;
            let service_time = tick - packet.arrival_tick();
            self.stats.record_delivery(service_time);
            delivered[entry.router] = true;

            self.event_sink.log(
                tick,
                Event::PacketDelivered {
                    packet_id: packet.id(),
                    router: entry.router,
                    service_time,
                },
            );
        }

        Ok(delivered)
    }

    fn report_routers(&mut self, tick: Tick) {
        for (router, r) in self.routers.iter().enumerate() {
            self.event_sink.log(
                tick,
                Event::RouterSnapshot {
                    router,
                    packets: r.snapshot(),
                },
            );
        }
    }

    /// Each router ages its own head, unless that router delivered this tick.
    /// Ready heads stay at zero.
    fn age_heads(&mut self, delivered: &[bool]) {
        for (router, r) in self.routers.iter_mut().enumerate() {
            if !delivered[router] {
                r.age_head();
            }
        }
    }
}
