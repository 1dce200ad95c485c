use std::cell::RefCell;
use std::rc::Rc;

// all ids are assigned per run, starting at 1
pub type PacketId = u64;
pub type Tick = u64;
pub type RouterIndex = usize;

/// Size of a packet, also the source of its time to destination
pub type PacketSize = u32;

/// Divisor turning a packet size into its initial time to destination
pub const SIZE_PER_TICK: PacketSize = 100;

/// Maximum packets that can arrive at the dispatcher in one tick, unless configured
pub const DEFAULT_MAX_PACKETS_PER_TICK: usize = 3;

/// Point-in-time view of a queued packet, used for router snapshots
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PacketSnapshot {
    pub id: PacketId,
    pub arrival_tick: Tick,
    pub remaining: u32,
}

/// Events emitted by the engine, one or more per tick sub-step
#[derive(Clone, PartialEq, Debug)]
pub enum Event {
    /// A new tick begins
    TickStarted,
    /// Packet generated and queued at the dispatcher
    PacketArrived { packet_id: PacketId, size: PacketSize },
    /// Generator produced nothing this tick
    NoArrivals,
    /// Packet moved from the dispatcher into a router
    PacketRouted {
        packet_id: PacketId,
        router: RouterIndex,
    },
    /// Every router was full, packet discarded
    PacketDropped { packet_id: PacketId },
    /// Packet admitted by the destination
    PacketDelivered {
        packet_id: PacketId,
        router: RouterIndex,
        service_time: Tick,
    },
    /// Router contents after admission, before aging
    RouterSnapshot {
        router: RouterIndex,
        packets: Vec<PacketSnapshot>,
    },
}

pub trait EventSink {
    fn log(&mut self, tick: Tick, event: Event);
}

/// No-op event sink for runs that only need the summary
pub struct NoOpSink;

impl EventSink for NoOpSink {
    #[inline(always)]
    fn log(&mut self, _tick: Tick, _event: Event) {}
}

// lets a caller keep a handle on a sink the engine owns
impl<S: EventSink> EventSink for Rc<RefCell<S>> {
    fn log(&mut self, tick: Tick, event: Event) {
        self.borrow_mut().log(tick, event);
    }
}
