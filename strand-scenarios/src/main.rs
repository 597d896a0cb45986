use std::rc::Rc;

use anyhow::Context as _;
use clap::Parser;
use strand_scenarios::config::{Command, Config};
use strand_scenarios::{Console, RandomDecider, Runner, Strategy};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "strand=info,strand_scenarios=info".into()),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::parse();

    let strategy = match config.command {
        Command::List => {
            for strategy in Strategy::ALL {
                println!("{strategy}");
            }
            return Ok(());
        }
        Command::Run(strategy) => strategy,
    };

    let decider = RandomDecider::new(config.seed, config.failure_rate);
    Runner::new(strategy)
        .tick_duration(config.tick())
        .run(Rc::new(Console), Rc::new(decider))
        .with_context(|| format!("strategy `{strategy}` did not complete"))?;

    Ok(())
}
