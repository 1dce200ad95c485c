//! Statistics and results for a simulation run

use crate::sf_interface::Tick;

/// Accumulators mutated by the engine during a run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunStatistics {
    /// Sum over delivered packets of delivery tick minus arrival tick
    pub total_service_time: u64,
    pub delivered: u64,
    pub dropped: u64,
    pub generated: u64,
}

impl RunStatistics {
    pub fn record_arrival(&mut self) {
        self.generated += 1;
    }

    pub fn record_delivery(&mut self, service_time: Tick) {
        self.total_service_time += service_time;
        self.delivered += 1;
    }

    pub fn record_drop(&mut self) {
        self.dropped += 1;
    }

    /// Zero when nothing was delivered
    pub fn average_service_time(&self) -> f64 {
        if self.delivered == 0 {
            return 0.0;
        }
        self.total_service_time as f64 / self.delivered as f64
    }
}

/// Simulation result
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub total_service_time: u64,
    pub total_delivered: u64,
    pub average_service_time: f64,
    pub total_dropped: u64,

    /// Packets generated over the whole run
    pub total_generated: u64,

    /// Packets still queued in routers when the run ended
    pub in_flight: u64,

    /// Number of ticks completed
    pub ticks: Tick,

    /// Seed used for the simulation, if arrivals were random
    pub seed_used: Option<[u8; 32]>,
}

impl RunSummary {
    pub fn from_statistics(
        stats: &RunStatistics,
        in_flight: u64,
        ticks: Tick,
        seed_used: Option<[u8; 32]>,
    ) -> Self {
        Self {
            total_service_time: stats.total_service_time,
            total_delivered: stats.delivered,
            average_service_time: stats.average_service_time(),
            total_dropped: stats.dropped,
            total_generated: stats.generated,
            in_flight,
            ticks,
            seed_used,
        }
    }

    /// Print a summary of the simulation results
    pub fn print_summary(&self) {
        println!("\n\nSimulation ending...");
        if self.total_delivered == 0 {
            println!("No packets have arrived at destination during the simulation.");
        }
        println!("Total service time: {}", self.total_service_time);
        println!("Total packets served: {}", self.total_delivered);
        println!(
            "Average service time per packet: {:.2}",
            self.average_service_time
        );
        println!("Total packets dropped: {}", self.total_dropped);
        println!(
            "Generated: {}, still in routers: {}",
            self.total_generated, self.in_flight
        );
        if let Some(seed) = self.seed_used {
            println!("Seed: {}", seed_to_hex(&seed));
        }
    }
}

pub fn seed_to_hex(seed: &[u8; 32]) -> String {
    seed.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_without_deliveries() {
        let stats = RunStatistics::default();
        assert_eq!(stats.average_service_time(), 0.0);
    }

    #[test]
    fn test_average_service_time() {
        let mut stats = RunStatistics::default();
        stats.record_delivery(2);
        stats.record_delivery(5);
        stats.record_drop();

        assert_eq!(stats.total_service_time, 7);
        assert_eq!(stats.delivered, 2);
        assert_eq!(stats.dropped, 1);
        assert_eq!(stats.average_service_time(), 3.5);
    }

    #[test]
    fn test_seed_hex() {
        let mut seed = [0u8; 32];
        seed[0] = 0xab;
        seed[31] = 0x01;
        let hex = seed_to_hex(&seed);
        assert_eq!(hex.len(), 64);
        assert!(hex.starts_with("ab00"));
        assert!(hex.ends_with("01"));
    }
}
