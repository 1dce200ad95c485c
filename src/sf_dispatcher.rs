use std::collections::VecDeque;

use crate::sf_packet::Packet;
use crate::sf_router::RouterError;

/// First-hop intake queue. Unbounded, drained completely every tick.
#[derive(Debug, Default)]
pub struct Dispatcher {
    queue: VecDeque<Packet>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, packet: Packet) {
        self.queue.push_back(packet);
    }

    pub fn dequeue(&mut self) -> Result<Packet, RouterError> {
        self.queue.pop_front().ok_or(RouterError::Empty)
    }

    pub fn peek(&self) -> Option<&Packet> {
        self.queue.front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
