use anyhow::{Context, Result};
use clap::Parser;
use ladder_core::SimulationBuilder;
use std::{path::PathBuf, time::Duration};

mod config;
mod control;
mod view;

/// An incremental industry ladder played from the terminal.
#[derive(Debug, Parser)]
#[command(name = "industry-ladder", version, about)]
struct Args {
    /// Game definition file.
    #[arg(long, default_value = "config/game.yml")]
    config: PathBuf,

    /// Where `t` saves and `y` loads.
    #[arg(long, default_value = "savegame.json")]
    save: PathBuf,

    /// Milliseconds between simulation ticks.
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Developer mode: purchases are free and save/load is disabled.
    #[arg(long)]
    dev: bool,

    /// Restore the save file at startup.
    #[arg(long)]
    load: bool,

    /// Append a CSV row for every tick that changed something.
    #[arg(long)]
    trace_csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    println!("--- Industry Ladder ---");

    let game = config::load_game_file(&args.config)?;

    let mut builder = SimulationBuilder::new()
        .with_game_file(game)
        .with_dev_mode(args.dev);
    if let Some(path) = &args.trace_csv {
        let path = path.to_str().context("Trace path is not valid UTF-8")?;
        builder = builder.with_timeseries_logging_to_file(path);
    }
    let mut engine = builder.build().context("Failed to build simulation")?;

    if args.load {
        if args.dev {
            println!("{}", control::SAVE_DISABLED);
        } else if let Err(e) = engine.load_from_file(&args.save) {
            println!("Starting a new game: {}", e);
        } else {
            println!("Restored '{}'.", args.save.display());
        }
    }

    println!("Keys: a/d industry, w/s worker, b buy, r run, q run lowest, u upgrade, m buy mode, t save, y load, x quit");

    let options = control::ControlOptions {
        tick_interval: Duration::from_millis(args.tick_ms.max(1)),
        save_path: args.save,
    };
    let engine = control::run(engine, options)?;

    println!("\nFinal resources: {}", engine.resource_summary().join(", "));
    Ok(())
}
