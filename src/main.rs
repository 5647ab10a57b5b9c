use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use reactor_nav::config::Config;
use reactor_nav::logging::init_tracing;
use reactor_nav::nav::tree;
use reactor_nav::render::TextRenderer;
use reactor_nav::scenario::Scenario;

#[derive(Parser, Debug)]
#[command(name = "reactor-nav", version, about = "Replay and inspect navigation scenarios")]
struct Cli {
    /// Config file (defaults to the platform config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dispatch every event and print one JSON line per produced command.
    Replay {
        scenario: PathBuf,
        /// Print the final container tree as JSON.
        #[arg(long = "tree")]
        print_tree: bool,
    },
    /// Validate the initial tree and print its visible stack.
    Show { scenario: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;
    init_tracing(&config.logging);

    match cli.command {
        Command::Replay {
            scenario,
            print_tree,
        } => {
            let loaded = Scenario::load(&scenario)?;
            info!(events = loaded.events.len(), "Replaying scenario");
            let (core, steps) = loaded.replay(config.broadcast.capacity);
            for step in &steps {
                println!("{}", serde_json::to_string(step)?);
            }
            if print_tree {
                let state = core.state();
                println!(
                    "{}",
                    serde_json::to_string_pretty(state.root_view_container())?
                );
            }
        }
        Command::Show { scenario } => {
            let loaded = Scenario::load(&scenario)?;
            let state = loaded.initial_state();
            let visible = tree::find_visible_container(state.root_view_container())
                .context("scenario has no visible container")?;
            print!("{}", TextRenderer.render_stack(visible));
        }
    }

    Ok(())
}
