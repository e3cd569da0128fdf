use clap::Parser;
use critter_core::{stress, CritterConfig, RuleTable};
use critter_limbic::{Brain, ChannelExecutor};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod command;

use command::{Command, HELP};

#[derive(Parser, Debug)]
#[command(name = "critter", author, version, about, long_about = None)]
struct Args {
    /// Path to the config file (brain settings and action rules)
    #[arg(short, long, default_value = "critter.toml", env = "CRITTER_CONFIG")]
    config: PathBuf,

    /// Load action rules from this TOML file instead of the config's `[[rules]]`
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Seed the random source for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Wall time of one delay unit, in milliseconds
    #[arg(long)]
    tick_unit_ms: Option<u64>,

    /// Emit logs and state snapshots as JSON
    #[arg(long)]
    json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.json);

    info!("Waking critter...");

    // 1. Load config
    let mut config = CritterConfig::load_or_default(&args.config)?;
    if let Some(seed) = args.seed {
        config.brain.seed = Some(seed);
    }
    if let Some(ms) = args.tick_unit_ms {
        config.brain.tick_unit_ms = ms;
    }

    // 2. Validate the rule table before anything runs
    let rules = match &args.rules {
        Some(path) => RuleTable::load(path)?,
        None => config.rule_table()?,
    };
    let rules = Arc::new(rules);
    info!("Loaded {} action rules", rules.len());

    // 3. Actuator stand-in: print every action the brain picks
    let (executor, mut actions) = ChannelExecutor::new();
    let actuator = tokio::spawn(async move {
        while let Some(payload) = actions.recv().await {
            println!("* {}", payload);
        }
    });

    // 4. Start the brain
    let brain = Brain::from_config(&config.brain, rules, Arc::new(executor));
    info!(
        "Brain online (decay {} per tick, {} ms per delay unit). Type 'help' for commands.",
        config.brain.decay_rate, config.brain.tick_unit_ms
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                None
            }
        };
        let Some(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(c) => c,
            Err(e) => {
                warn!("{:#}", e);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::State => {
                let emotions = brain.emotions().await;
                if args.json {
                    println!("{}", serde_json::to_string(&emotions)?);
                } else {
                    println!("{} stress={}", emotions, stress(&emotions));
                }
            }
            Command::Set(values) => match brain.set_emotions(values).await {
                Ok(state) => info!("Emotions set to {}", state),
                Err(e) => error!("Rejected: {}", e),
            },
            Command::Interact(interaction) => {
                if brain.interact(interaction).await.is_none() {
                    println!("(nothing to do)");
                }
            }
        }
    }

    info!("Putting critter to sleep...");
    brain.shutdown().await?;
    actuator.await?;
    Ok(())
}
