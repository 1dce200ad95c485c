// Interactive Simulator - prompts for a configuration, runs it, offers another run
//
// Usage:
//   cargo run --bin interactive_sim

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use log::error;
use simple_logger::SimpleLogger;

use sf_rust::sf_event_sinks::ConsoleEventSink;
use sf_rust::{ConfigError, SimConfig, SimEngine};

/// Why a prompt could not produce a usable configuration
#[derive(Debug, PartialEq)]
enum PromptError {
    Config(ConfigError),
    Closed,
}

impl From<ConfigError> for PromptError {
    fn from(e: ConfigError) -> Self {
        PromptError::Config(e)
    }
}

struct Prompter<R: BufRead> {
    input: R,
}

impl<R: BufRead> Prompter<R> {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        print!("{}", prompt);
        let _ = io::stdout().flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => Err(PromptError::Closed),
            Ok(_) => Ok(line.trim().to_string()),
        }
    }

    fn number<T: FromStr>(&mut self, prompt: &str) -> Result<T, PromptError> {
        let line = self.read_line(prompt)?;
        line.parse().map_err(|_| match line.parse::<i64>() {
            Ok(value) if value < 0 => ConfigError::NotPositive(value).into(),
            _ => ConfigError::NotANumber(line).into(),
        })
    }

    fn config(&mut self) -> Result<SimConfig, PromptError> {
        let num_routers = self.number("Enter the number of intermediate routers: ")?;
        let arrival_probability: f64 =
            self.number("\nEnter the arrival probability of a packet: ")?;
        if !(0.0..=1.0).contains(&arrival_probability) {
            return Err(ConfigError::InvalidProbability(arrival_probability).into());
        }
        let router_capacity = self.number("\nEnter the maximum buffer size of a router: ")?;
        let max_packets_per_tick = self.number(
            "\nEnter the maximum number of packets that can arrive at dispatcher: ",
        )?;
        let min_packet_size =
            self.number("\nEnter the minimum size of a packet (Recommend size of 100): ")?;
        let max_packet_size =
            self.number("\nEnter the maximum size of a packet (Recommend size > 100): ")?;
        let bandwidth = self.number("\nEnter the bandwidth size: ")?;
        let duration = self.number("\nEnter the simulation duration: ")?;

        let config = SimConfig {
            num_routers,
            arrival_probability,
            min_packet_size,
            max_packet_size,
            max_packets_per_tick,
            router_capacity,
            bandwidth,
            duration,
            seed: None,
            enable_event_logging: true,
        };
        config.validate()?;
        Ok(config)
    }

    /// Ask until the answer is y or n
    fn another_run(&mut self) -> Result<bool, PromptError> {
        let mut answer = self
            .read_line("\nDo you want to try another simulation? [y|n]: ")?
            .to_lowercase();
        while answer != "y" && answer != "n" {
            answer = self.read_line("\nPlease enter only y or n: ")?.to_lowercase();
        }
        Ok(answer == "y")
    }
}

fn main() {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .init()
        .unwrap();

    let stdin = io::stdin();
    let mut prompter = Prompter {
        input: stdin.lock(),
    };

    loop {
        println!("Starting simulator...\n");

        let config = match prompter.config() {
            Ok(config) => config,
            Err(PromptError::Config(e)) => {
                println!("Error: {}.\n", e);
                continue;
            }
            Err(PromptError::Closed) => break,
        };

        let sink = ConsoleEventSink::new(config.enable_event_logging);
        let mut engine = SimEngine::new(config).with_sink(Box::new(sink));
        match engine.run() {
            Ok(summary) => summary.print_summary(),
            Err(e) => {
                error!("simulation aborted: {}", e);
                println!("{}", e);
            }
        }

        match prompter.another_run() {
            Ok(true) => println!(),
            Ok(false) | Err(_) => break,
        }
    }

    println!("\nProgram terminating successfully...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(script: &str) -> Prompter<Cursor<Vec<u8>>> {
        Prompter {
            input: Cursor::new(script.as_bytes().to_vec()),
        }
    }

    #[test]
    fn test_reads_fields_in_prompt_order() {
        let mut input = prompter("3\n0.25\n5\n2\n100\n400\n1\n30\n");
        let config = input.config().unwrap();

        assert_eq!(config.num_routers, 3);
        assert_eq!(config.arrival_probability, 0.25);
        assert_eq!(config.router_capacity, 5);
        assert_eq!(config.max_packets_per_tick, 2);
        assert_eq!(config.min_packet_size, 100);
        assert_eq!(config.max_packet_size, 400);
        assert_eq!(config.bandwidth, 1);
        assert_eq!(config.duration, 30);
        assert!(config.enable_event_logging);
    }

    #[test]
    fn test_rejects_non_number() {
        let mut input = prompter("abc\n");
        assert_eq!(
            input.config().unwrap_err(),
            PromptError::Config(ConfigError::NotANumber("abc".to_string()))
        );
    }

    #[test]
    fn test_rejects_negative_count() {
        let mut input = prompter("-3\n");
        assert_eq!(
            input.config().unwrap_err(),
            PromptError::Config(ConfigError::NotPositive(-3))
        );
    }

    #[test]
    fn test_rejects_probability_out_of_range() {
        let mut input = prompter("2\n1.5\n");
        assert_eq!(
            input.config().unwrap_err(),
            PromptError::Config(ConfigError::InvalidProbability(1.5))
        );
    }

    #[test]
    fn test_rejects_min_above_max() {
        let mut input = prompter("2\n0.5\n4\n3\n500\n100\n1\n10\n");
        assert_eq!(
            input.config().unwrap_err(),
            PromptError::Config(ConfigError::InvalidPacketSize { min: 500, max: 100 })
        );
    }

    #[test]
    fn test_another_run_asks_until_y_or_n() {
        let mut input = prompter("maybe\n\nN\n");
        assert_eq!(input.another_run(), Ok(false));

        let mut input = prompter(" y \n");
        assert_eq!(input.another_run(), Ok(true));
    }

    #[test]
    fn test_end_of_input_is_closed() {
        assert_eq!(prompter("").config().unwrap_err(), PromptError::Closed);
        assert_eq!(prompter("2\n").config().unwrap_err(), PromptError::Closed);
        assert_eq!(prompter("maybe\n").another_run(), Err(PromptError::Closed));
    }
}
