// Simulation Configuration

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Deserialize;
use thiserror::Error;

use crate::sf_interface::{PacketSize, Tick, DEFAULT_MAX_PACKETS_PER_TICK};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("please enter a number: {0:?}")]
    NotANumber(String),
    #[error("please enter a positive integer: {0}")]
    NotPositive(i64),
    #[error("invalid input, please only enter a probability in range of [0,1]: {0}")]
    InvalidProbability(f64),
    #[error("packet sizes must be positive with min <= max (min {min}, max {max})")]
    InvalidPacketSize { min: PacketSize, max: PacketSize },
    #[error("simulation duration must be at least one tick")]
    ZeroDuration,
}

/// Main simulation configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of intermediate routers
    pub num_routers: usize,

    /// Probability of each arrival trial producing a packet
    pub arrival_probability: f64,

    pub min_packet_size: PacketSize,
    pub max_packet_size: PacketSize,

    /// Arrival trials per tick
    pub max_packets_per_tick: usize,

    /// Maximum buffer size shared by every router
    pub router_capacity: usize,

    /// Packets the destination admits per tick
    pub bandwidth: usize,

    /// Number of ticks to simulate
    pub duration: Tick,

    /// Random seed (None = generate random)
    #[serde(skip)]
    pub seed: Option<[u8; 32]>,

    pub enable_event_logging: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_routers: 4,
            arrival_probability: 0.5,
            min_packet_size: 100,
            max_packet_size: 500,
            max_packets_per_tick: DEFAULT_MAX_PACKETS_PER_TICK,
            router_capacity: 10,
            bandwidth: 2,
            duration: 25,
            seed: None,
            enable_event_logging: false,
        }
    }
}

impl SimConfig {
    /// Get or generate seed
    pub fn resolve_seed(&self) -> [u8; 32] {
        self.seed.unwrap_or_else(|| {
            let mut temp_rng = StdRng::from_entropy();
            let mut seed = [0u8; 32];
            temp_rng.fill_bytes(&mut seed);
            seed
        })
    }

    /// Range checks the operator-facing fields. Counts are unsigned so
    /// negative values never reach this point.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.arrival_probability) {
            return Err(ConfigError::InvalidProbability(self.arrival_probability));
        }
        if self.min_packet_size == 0 || self.min_packet_size > self.max_packet_size {
            return Err(ConfigError::InvalidPacketSize {
                min: self.min_packet_size,
                max: self.max_packet_size,
            });
        }
        if self.duration == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
        assert_eq!(SimConfig::default().max_packets_per_tick, 3);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let config = SimConfig {
            arrival_probability: 1.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidProbability(1.5)));

        let config = SimConfig {
            min_packet_size: 600,
            max_packet_size: 500,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPacketSize { min: 600, max: 500 })
        ));

        let config = SimConfig {
            min_packet_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SimConfig {
            duration: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDuration));
    }

    #[test]
    fn test_zero_counts_are_allowed() {
        let config = SimConfig {
            num_routers: 0,
            router_capacity: 0,
            bandwidth: 0,
            max_packets_per_tick: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_resolve_seed_keeps_fixed_seed() {
        let config = SimConfig {
            seed: Some([9u8; 32]),
            ..Default::default()
        };
        assert_eq!(config.resolve_seed(), [9u8; 32]);
    }

    #[test]
    fn test_yaml_partial_config() {
        let yaml = "num_routers: 2\nrouter_capacity: 3\nbandwidth: 1\nduration: 40\n";
        let config: SimConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.num_routers, 2);
        assert_eq!(config.router_capacity, 3);
        assert_eq!(config.duration, 40);
        assert_eq!(config.max_packet_size, SimConfig::default().max_packet_size);
        assert!(config.seed.is_none());
    }
}
