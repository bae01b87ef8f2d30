use clap::Parser;
use lazysearch::commands::{self, Command};
use lazysearch_core::{Config, SearchEvent, SearchManager, VoxelPos, WorldBounds};
use lazysearch_world::ProceduralWorld;
use std::io::Write;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;

#[derive(Parser)]
#[command(name = "lazysearch", about = "lazysearch — concurrent voxel search shell")]
struct Cli {
    /// Verbose engine logging (RUST_LOG overrides).
    #[arg(long)]
    debug: bool,
    /// Half-width of the demo world cube.
    #[arg(long, default_value_t = 256)]
    world_half: i32,
    /// Terrain seed for the demo world.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Ignore ~/.config/lazysearch/config.toml and use built-in defaults.
    #[arg(long)]
    no_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let config = if cli.no_config {
        Config::defaults()
    } else {
        Config::load()?
    };

    let world = Arc::new(ProceduralWorld::new(WorldBounds::cube(cli.world_half), cli.seed));
    let manager = Arc::new(SearchManager::new(world, &config));

    // Display consumer: an independent task draining the event stream and
    // printing each find as it lands.
    let mut events = manager.subscribe();
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                SearchEvent::Match(pos) => println!("  hit at {pos}"),
                SearchEvent::Completed(outcome) => println!("{}", commands::summarize(&outcome)),
                SearchEvent::ShellSubmitted(shell) => tracing::debug!(shell, "shell submitted"),
            }
        }
    });

    println!("lazysearch shell — type 'help' for commands");
    let origin = VoxelPos::ORIGIN;
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    prompt()?;
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(cmd) => match commands::dispatch(cmd, &manager, origin).await {
                Ok(msg) => println!("{msg}"),
                Err(msg) => println!("error: {msg}"),
            },
            Err(usage) if usage.is_empty() => {}
            Err(usage) => println!("{usage}"),
        }
        prompt()?;
    }

    manager.shutdown().await;
    printer.abort();
    Ok(())
}

fn prompt() -> std::io::Result<()> {
    print!("> ");
    std::io::stdout().flush()
}
