//! Various event sinks for different use cases

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::sf_interface::{Event, EventSink, PacketId, PacketSnapshot, RouterIndex, Tick};

// ============================================================================
// Console Logging Sink
// ============================================================================

/// Prints one line per event, in the classic simulator wording
pub struct ConsoleEventSink {
    enabled: bool,
}

impl ConsoleEventSink {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

fn format_router(packets: &[PacketSnapshot]) -> String {
    let inner: Vec<String> = packets
        .iter()
        .map(|p| format!("[{}, {}, {}]", p.id, p.arrival_tick, p.remaining))
        .collect();
    format!("{{{}}}", inner.join(", "))
}

impl EventSink for ConsoleEventSink {
    fn log(&mut self, tick: Tick, event: Event) {
        if !self.enabled {
            return;
        }

        match event {
            Event::TickStarted => println!("\nTime: {}", tick),
            Event::PacketArrived { packet_id, size } => {
                println!(
                    "Packet {} arrives at dispatcher with size {}.",
                    packet_id, size
                );
            }
            Event::NoArrivals => println!("No packets arrived."),
            Event::PacketRouted { packet_id, router } => {
                println!("Packet {} sent to Router {}.", packet_id, router + 1);
            }
            Event::PacketDropped { packet_id } => {
                println!("Network is congested. Packet {} is dropped.", packet_id);
            }
            Event::PacketDelivered {
                packet_id,
                service_time,
                ..
            } => {
                println!(
                    "Packet {} has successfully reached its destination: +{}",
                    packet_id, service_time
                );
            }
            Event::RouterSnapshot { router, packets } => {
                println!("R{}: {}", router + 1, format_router(&packets));
            }
        }
    }
}

// ============================================================================
// CSV Event Sink
// ============================================================================

/// CSV event sink for structured data export
pub struct CsvEventSink<W: Write = BufWriter<File>> {
    writer: W,
}

impl CsvEventSink<BufWriter<File>> {
    pub fn new<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Self::from_writer(BufWriter::new(file))
    }
}

impl<W: Write> CsvEventSink<W> {
    pub fn from_writer(mut writer: W) -> std::io::Result<Self> {
        writeln!(writer, "tick,event_type,packet_id,router,value")?;
        Ok(Self { writer })
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EventSink for CsvEventSink<W> {
    fn log(&mut self, tick: Tick, event: Event) {
        let result = match event {
            Event::TickStarted => writeln!(self.writer, "{},TickStarted,,,", tick),
            Event::PacketArrived { packet_id, size } => {
                writeln!(self.writer, "{},PacketArrived,{},,{}", tick, packet_id, size)
            }
            Event::NoArrivals => writeln!(self.writer, "{},NoArrivals,,,", tick),
            Event::PacketRouted { packet_id, router } => {
                writeln!(self.writer, "{},PacketRouted,{},{},", tick, packet_id, router)
            }
            Event::PacketDropped { packet_id } => {
                writeln!(self.writer, "{},PacketDropped,{},,", tick, packet_id)
            }
            Event::PacketDelivered {
                packet_id,
                router,
                service_time,
            } => writeln!(
                self.writer,
                "{},PacketDelivered,{},{},{}",
                tick, packet_id, router, service_time
            ),
            Event::RouterSnapshot { router, packets } => writeln!(
                self.writer,
                "{},RouterSnapshot,,{},{}",
                tick,
                router,
                packets.len()
            ),
        };

        if let Err(e) = result {
            log::error!("Error writing to CSV: {}", e);
        }
    }
}

// ============================================================================
// Collector Event Sink (In-Memory)
// ============================================================================

/// Collects events in memory for programmatic analysis
#[derive(Default)]
pub struct CollectorEventSink {
    pub events: Vec<EventRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub tick: Tick,
    pub event: Event,
}

impl CollectorEventSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// (tick, packet, router, service time) for every delivery
    pub fn deliveries(&self) -> impl Iterator<Item = (Tick, PacketId, RouterIndex, Tick)> + '_ {
        self.events.iter().filter_map(|r| match r.event {
            Event::PacketDelivered {
                packet_id,
                router,
                service_time,
            } => Some((r.tick, packet_id, router, service_time)),
            _ => None,
        })
    }

    pub fn drops(&self) -> impl Iterator<Item = &EventRecord> {
        self.events
            .iter()
            .filter(|e| matches!(e.event, Event::PacketDropped { .. }))
    }

    pub fn in_tick_range(&self, start: Tick, end: Tick) -> impl Iterator<Item = &EventRecord> {
        self.events
            .iter()
            .filter(move |e| e.tick >= start && e.tick <= end)
    }

    pub fn count_by_type(&self) -> EventTypeCounts {
        let mut counts = EventTypeCounts::default();
        for record in &self.events {
            match record.event {
                Event::TickStarted => counts.tick_started += 1,
                Event::PacketArrived { .. } => counts.packet_arrived += 1,
                Event::NoArrivals => counts.no_arrivals += 1,
                Event::PacketRouted { .. } => counts.packet_routed += 1,
                Event::PacketDropped { .. } => counts.packet_dropped += 1,
                Event::PacketDelivered { .. } => counts.packet_delivered += 1,
                Event::RouterSnapshot { .. } => counts.router_snapshot += 1,
            }
        }
        counts
    }

    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut csv_sink = CsvEventSink::new(path)?;
        for record in &self.events {
            csv_sink.log(record.tick, record.event.clone());
        }
        csv_sink.flush()
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct EventTypeCounts {
    pub tick_started: usize,
    pub packet_arrived: usize,
    pub no_arrivals: usize,
    pub packet_routed: usize,
    pub packet_dropped: usize,
    pub packet_delivered: usize,
    pub router_snapshot: usize,
}

impl EventSink for CollectorEventSink {
    fn log(&mut self, tick: Tick, event: Event) {
        self.events.push(EventRecord { tick, event });
    }
}

// ============================================================================
// Multi Sink (Combine Multiple Sinks)
// ============================================================================

/// Combines multiple event sinks
#[derive(Default)]
pub struct MultiEventSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl MultiEventSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }
}

impl EventSink for MultiEventSink {
    fn log(&mut self, tick: Tick, event: Event) {
        for sink in &mut self.sinks {
            sink.log(tick, event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_router_format() {
        let packets = [
            PacketSnapshot {
                id: 1,
                arrival_tick: 2,
                remaining: 3,
            },
            PacketSnapshot {
                id: 4,
                arrival_tick: 5,
                remaining: 0,
            },
        ];
        assert_eq!(format_router(&packets), "{[1, 2, 3], [4, 5, 0]}");
        assert_eq!(format_router(&[]), "{}");
    }

    #[test]
    fn test_csv_rows() {
        let mut sink = CsvEventSink::from_writer(Vec::new()).unwrap();
        sink.log(
            3,
            Event::PacketDelivered {
                packet_id: 7,
                router: 1,
                service_time: 2,
            },
        );
        sink.log(3, Event::PacketDropped { packet_id: 8 });

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "tick,event_type,packet_id,router,value");
        assert_eq!(lines[1], "3,PacketDelivered,7,1,2");
        assert_eq!(lines[2], "3,PacketDropped,8,,");
    }

    #[test]
    fn test_multi_sink_fans_out() {
        let a = Rc::new(RefCell::new(CollectorEventSink::new()));
        let b = Rc::new(RefCell::new(CollectorEventSink::new()));

        let mut multi = MultiEventSink::new();
        multi.add_sink(Box::new(a.clone()));
        multi.add_sink(Box::new(b.clone()));
        multi.log(1, Event::NoArrivals);
        multi.log(2, Event::PacketDropped { packet_id: 1 });

        assert_eq!(a.borrow().events, b.borrow().events);
        assert_eq!(a.borrow().drops().count(), 1);
        assert_eq!(a.borrow().in_tick_range(2, 2).count(), 1);
    }
}
