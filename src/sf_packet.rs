use std::fmt;

use crate::sf_interface::{PacketId, PacketSize, PacketSnapshot, Tick, SIZE_PER_TICK};

/// A packet travelling dispatcher -> router -> destination.
///
/// Only `remaining` changes after creation. Equality is by id: two packets
/// with the same size and arrival tick are still different packets.
#[derive(Clone, Debug)]
pub struct Packet {
    id: PacketId,
    size: PacketSize,
    arrival_tick: Tick,
    remaining: u32,
}

impl Packet {
    pub fn new(id: PacketId, size: PacketSize, arrival_tick: Tick) -> Self {
        Self {
            id,
            size,
            arrival_tick,
            remaining: size / SIZE_PER_TICK,
        }
    }

    pub fn id(&self) -> PacketId {
        self.id
    }

    pub fn size(&self) -> PacketSize {
        self.size
    }

    pub fn arrival_tick(&self) -> Tick {
        self.arrival_tick
    }

    /// Ticks left before the packet is ready for the destination
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_ready(&self) -> bool {
        self.remaining == 0
    }

    /// Decrement the time to destination, never below zero.
    /// Returns false when the packet was already ready.
    pub fn age(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    pub fn snapshot(&self) -> PacketSnapshot {
        PacketSnapshot {
            id: self.id,
            arrival_tick: self.arrival_tick,
            remaining: self.remaining,
        }
    }
}

impl PartialEq for Packet {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Packet {}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.id, self.arrival_tick, self.remaining)
    }
}

/// Hands out packet ids for one run
#[derive(Debug, Default)]
pub struct PacketIdAllocator {
    last: PacketId,
}

impl PacketIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> PacketId {
        self.last += 1;
        self.last
    }

    pub fn reset(&mut self) {
        self.last = 0;
    }
}
