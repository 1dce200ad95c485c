//! Packet arrivals at the dispatcher.
//!
//! The randomness lives behind [`PacketSource`] so a run can be driven either by a
//! seeded RNG ([`RandomSource`]) or by a fixed schedule ([`ScheduledSource`]).

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::sf_config::SimConfig;
use crate::sf_interface::{PacketSize, Tick};
use crate::sf_packet::{Packet, PacketIdAllocator};

/// Decides which packet sizes arrive in a given tick
pub trait PacketSource {
    /// Sizes of the packets arriving this tick, in arrival order
    fn arrivals(&mut self, tick: Tick) -> Vec<PacketSize>;

    /// Rewind to the state at the start of a run
    fn reset(&mut self);
}

/// Up to `max_per_tick` independent arrival trials per tick,
/// each succeeding with `arrival_probability`; sizes uniform in the range.
pub struct RandomSource {
    rng: StdRng,
    seed: [u8; 32],
    arrival_probability: f64,
    size_range: (PacketSize, PacketSize),
    max_per_tick: usize,
}

impl RandomSource {
    pub fn new(
        seed: [u8; 32],
        arrival_probability: f64,
        size_range: (PacketSize, PacketSize),
        max_per_tick: usize,
    ) -> Self {
        Self {
            rng: StdRng::from_seed(seed),
            seed,
            arrival_probability,
            size_range,
            max_per_tick,
        }
    }

    pub fn from_config(config: &SimConfig, seed: [u8; 32]) -> Self {
        Self::new(
            seed,
            config.arrival_probability,
            (config.min_packet_size, config.max_packet_size),
            config.max_packets_per_tick,
        )
    }
}

impl PacketSource for RandomSource {
    fn arrivals(&mut self, _tick: Tick) -> Vec<PacketSize> {
        let (min, max) = self.size_range;
        let mut sizes = Vec::new();
        for _ in 0..self.max_per_tick {
            if self.rng.gen::<f64>() < self.arrival_probability {
                sizes.push(self.rng.gen_range(min.min(max)..=max));
            }
        }
        sizes
    }

    fn reset(&mut self) {
        self.rng = StdRng::from_seed(self.seed);
    }
}

/// Fixed arrivals per tick; ticks without an entry get no packets
#[derive(Debug, Default, Clone)]
pub struct ScheduledSource {
    schedule: BTreeMap<Tick, Vec<PacketSize>>,
}

impl ScheduledSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_arrivals(mut self, tick: Tick, sizes: &[PacketSize]) -> Self {
        self.schedule.entry(tick).or_default().extend_from_slice(sizes);
        self
    }

    /// Total packets scheduled over all ticks
    pub fn total(&self) -> usize {
        self.schedule.values().map(Vec::len).sum()
    }
}

impl PacketSource for ScheduledSource {
    fn arrivals(&mut self, tick: Tick) -> Vec<PacketSize> {
        self.schedule.get(&tick).cloned().unwrap_or_default()
    }

    fn reset(&mut self) {}
}

/// Turns a source's sizes into numbered packets
pub struct PacketGenerator {
    source: Box<dyn PacketSource>,
}

impl PacketGenerator {
    pub fn new(source: Box<dyn PacketSource>) -> Self {
        Self { source }
    }

    pub fn generate(&mut self, tick: Tick, ids: &mut PacketIdAllocator) -> Vec<Packet> {
        self.source
            .arrivals(tick)
            .into_iter()
            .map(|size| Packet::new(ids.next_id(), size, tick))
            .collect()
    }

    pub fn reset(&mut self) {
        self.source.reset();
    }
}
