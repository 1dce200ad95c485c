// capacity-bounded router queues

use std::collections::VecDeque;
use std::fmt;

use thiserror::Error;

use crate::sf_interface::{PacketId, PacketSnapshot, RouterIndex};
use crate::sf_packet::Packet;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("invalid: the router is empty")]
    Empty,
    #[error("router is full ({capacity} packets)")]
    Full { capacity: usize },
}

/// Bounded FIFO of packets. Only the head ages or departs.
#[derive(Debug, Clone)]
pub struct Router {
    packets: VecDeque<Packet>,
    capacity: usize,
}

impl Router {
    pub fn new(capacity: usize) -> Self {
        Self {
            packets: VecDeque::new(),
            capacity,
        }
    }

    pub fn enqueue(&mut self, packet: Packet) -> Result<(), RouterError> {
        if self.is_full() {
            return Err(RouterError::Full {
                capacity: self.capacity,
            });
        }
        self.packets.push_back(packet);
        Ok(())
    }

    pub fn dequeue(&mut self) -> Result<Packet, RouterError> {
        self.packets.pop_front().ok_or(RouterError::Empty)
    }

    pub fn peek(&self) -> Option<&Packet> {
        self.packets.front()
    }

    pub fn head_id(&self) -> Option<PacketId> {
        self.peek().map(Packet::id)
    }

    /// Age the head packet. Returns true when its time to destination dropped.
    pub fn age_head(&mut self) -> bool {
        match self.packets.front_mut() {
            Some(head) => head.age(),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.packets.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Packet> {
        self.packets.iter()
    }

    pub fn snapshot(&self) -> Vec<PacketSnapshot> {
        self.packets.iter().map(Packet::snapshot).collect()
    }
}

impl fmt::Display for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, packet) in self.packets.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", packet)?;
        }
        write!(f, "}}")
    }
}

/// Fixed set of intermediate routers sharing one capacity.
/// Indices are stable for the whole run.
#[derive(Debug, Clone)]
pub struct RouterPool {
    routers: Vec<Router>,
    capacity: usize,
}

impl RouterPool {
    pub fn new(count: usize, capacity: usize) -> Self {
        Self {
            routers: (0..count).map(|_| Router::new(capacity)).collect(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.routers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routers.is_empty()
    }

    pub fn routers(&self) -> &[Router] {
        &self.routers
    }

    pub fn get(&self, index: RouterIndex) -> Option<&Router> {
        self.routers.get(index)
    }

    pub fn get_mut(&mut self, index: RouterIndex) -> Option<&mut Router> {
        self.routers.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Router> {
        self.routers.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Router> {
        self.routers.iter_mut()
    }

    /// Packets queued across all routers
    pub fn queued(&self) -> usize {
        self.routers.iter().map(Router::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut router = Router::new(3);
        router.enqueue(Packet::new(1, 100, 1)).unwrap();
        router.enqueue(Packet::new(2, 100, 1)).unwrap();
        router.enqueue(Packet::new(3, 100, 2)).unwrap();

        assert_eq!(router.dequeue().unwrap().id(), 1);
        assert_eq!(router.dequeue().unwrap().id(), 2);
        assert_eq!(router.dequeue().unwrap().id(), 3);
    }

    #[test]
    fn test_enqueue_full_is_rejected() {
        let mut router = Router::new(1);
        router.enqueue(Packet::new(1, 100, 1)).unwrap();
        assert!(router.is_full());

        let err = router.enqueue(Packet::new(2, 100, 1)).unwrap_err();
        assert_eq!(err, RouterError::Full { capacity: 1 });
        assert_eq!(router.len(), 1);
    }

    #[test]
    fn test_zero_capacity_is_always_full() {
        let router = Router::new(0);
        assert!(router.is_empty());
        assert!(router.is_full());
    }

    #[test]
    fn test_dequeue_empty() {
        let mut router = Router::new(2);
        assert_eq!(router.dequeue().unwrap_err(), RouterError::Empty);
        assert!(router.peek().is_none());
    }

    #[test]
    fn test_only_head_ages() {
        let mut router = Router::new(2);
        router.enqueue(Packet::new(1, 200, 1)).unwrap();
        router.enqueue(Packet::new(2, 300, 1)).unwrap();

        assert!(router.age_head());
        let snapshot = router.snapshot();
        assert_eq!(snapshot[0].remaining, 1);
        assert_eq!(snapshot[1].remaining, 3);
    }

    #[test]
    fn test_display() {
        let mut router = Router::new(2);
        assert_eq!(router.to_string(), "{}");

        router.enqueue(Packet::new(1, 200, 1)).unwrap();
        router.enqueue(Packet::new(2, 50, 3)).unwrap();
        assert_eq!(router.to_string(), "{[1, 1, 2], [2, 3, 0]}");
    }

    #[test]
    fn test_huge_capacity_allocates_lazily() {
        let mut pool = RouterPool::new(4, 1 << 40);
        let router = pool.get_mut(0).unwrap();
        router.enqueue(Packet::new(1, 100, 1)).unwrap();

        assert!(!router.is_full());
        assert_eq!(pool.queued(), 1);
    }

    #[test]
    fn test_pool_shares_capacity() {
        let pool = RouterPool::new(3, 4);
        assert_eq!(pool.len(), 3);
        assert!(pool.iter().all(|r| r.capacity() == 4));
        assert_eq!(pool.queued(), 0);
    }
}
