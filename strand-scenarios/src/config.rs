//! Command line and environment configuration for `strand-demo`.

use std::str::FromStr;
use std::time::Duration;

use clap::Parser;

use crate::error::ScenarioError;
use crate::strategy::Strategy;

/// What the demo should do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Print every strategy name.
    List,
    /// Run one strategy.
    Run(Strategy),
}

impl FromStr for Command {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(Command::List),
            name => name.parse().map(Command::Run),
        }
    }
}

/// Narrated demonstrations of serial, parallel and race orchestration.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "strand-demo", version)]
pub struct Config {
    /// Strategy to run, or `list` to print them all.
    #[arg(value_name = "STRATEGY|list", default_value = "parallel-coroutine-with-fail")]
    pub command: Command,

    /// Seed for the failure generator; random when absent.
    #[arg(long, env = "STRAND_SEED")]
    pub seed: Option<u64>,

    /// Real milliseconds taken by one tick.
    #[arg(long, env = "STRAND_TICK_MS", default_value_t = 1000)]
    pub tick_ms: u64,

    /// Probability that a demo task fails, in `[0, 1]`.
    #[arg(long, env = "STRAND_FAILURE_RATE", default_value_t = 0.5, value_parser = failure_rate)]
    pub failure_rate: f64,
}

impl Config {
    /// Real time taken by one tick.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

fn failure_rate(value: &str) -> Result<f64, String> {
    let rate: f64 = value.parse().map_err(|_| format!("`{value}` is not a number"))?;

    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(format!("`{value}` is not between 0 and 1"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        let argv = std::iter::once("strand-demo").chain(args.iter().copied());
        Config::try_parse_from(argv)
    }

    #[test]
    fn defaults() {
        let config = parse(&[]).unwrap();

        assert_eq!(
            config.command,
            Command::Run("parallel-coroutine-with-fail".parse().unwrap())
        );
        assert_eq!(config.tick(), Duration::from_secs(1));
    }

    #[test]
    fn flags() {
        let config = parse(&[
            "race-tasks",
            "--seed",
            "42",
            "--tick-ms",
            "0",
            "--failure-rate",
            "1",
        ])
        .unwrap();

        assert_eq!(config.command, Command::Run("race-tasks".parse().unwrap()));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.tick(), Duration::ZERO);
        assert_eq!(config.failure_rate, 1.0);
    }

    #[test]
    fn list_command() {
        let config = parse(&["list", "--seed", "9"]).unwrap();

        assert_eq!(config.command, Command::List);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn rejects_bad_input() {
        let kind = |args: &[&str]| parse(args).unwrap_err().kind();

        assert!(parse(&["--seed"]).is_err());
        assert_eq!(kind(&["--failure-rate", "1.5"]), ErrorKind::ValueValidation);
        assert_eq!(kind(&["--failure-rate", "often"]), ErrorKind::ValueValidation);
        assert_eq!(kind(&["--verbose"]), ErrorKind::UnknownArgument);
        assert_eq!(kind(&["serial-tasks", "race-tasks"]), ErrorKind::UnknownArgument);
        assert_eq!(kind(&["nope"]), ErrorKind::ValueValidation);
    }
}
