use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use log::{info, warn};
use mixq::clients::entities::ControlAction;
use mixq::clients::errors::Result;
use mixq::{ConfigBuilder, Controller};

#[derive(Parser)]
#[command(name = "mixq")]
#[command(version, about = "Queue controller for the MixQ music player", long_about = None)]
struct Cli {
    /// MixQ server address [default: $MIXQ_SERVER_URL or http://127.0.0.1:8085]
    #[arg(long, global = true)]
    server: Option<String>,

    /// Local storage database file
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// Seconds between player polls in `watch`
    #[arg(long, global = true)]
    poll_interval: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the queue with projected start times
    Show,
    /// Replace the queue with a playlist from the server
    Load { playlist: String },
    /// Remove the track at row N
    Remove { row: usize },
    /// Shuffle the queue
    Shuffle,
    /// Move the track at row FROM to row TO
    Move { from: usize, to: usize },
    /// Put the queue in the order of the given track ids
    Reorder {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Toggle play/pause on the player
    PlayPause,
    /// Play the next queued track
    Next,
    /// Go back to the previous track
    Previous,
    /// Show or toggle the colour theme
    Theme {
        #[arg(value_parser = ["toggle"])]
        action: Option<String>,
    },
    /// Show, list or set the time zone used for start times
    Timezone {
        name: Option<String>,
        #[arg(long)]
        list: bool,
    },
    /// Follow the player and keep the queue in step
    Watch,
}

// Rows are shown 1-based
fn row_index(row: usize) -> Option<usize> {
    row.checked_sub(1)
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    info!("Building config ...");
    let config = ConfigBuilder::new()
        .server_url(cli.server)
        .storage_path(cli.storage)
        .poll_interval(cli.poll_interval.map(Duration::from_secs))
        .build()
        .await?;
    let mut controller = Controller::restore(config).await?;

    match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => {}
        Commands::Load { playlist } => {
            let count = controller.load_playlist(&playlist).await?;
            println!("Loaded {count} tracks from {playlist}");
        }
        Commands::Remove { row } => {
            let removed = match row_index(row) {
                Some(index) => controller.remove_track(index).await?,
                None => None,
            };
            match removed {
                Some(track) => println!("Removed {}", track.name),
                None => warn!("No track at row {row}"),
            }
        }
        Commands::Shuffle => controller.randomize().await?,
        Commands::Move { from, to } => {
            let moved = match (row_index(from), row_index(to)) {
                (Some(from), Some(to)) => controller.move_track(from, to).await?,
                _ => false,
            };
            if !moved {
                warn!("No track at row {from}");
            }
        }
        Commands::Reorder { ids } => controller.reorder(&ids).await?,
        Commands::PlayPause => controller.control(ControlAction::PlayPause).await?,
        Commands::Next => controller.control(ControlAction::NextTrack).await?,
        Commands::Previous => controller.control(ControlAction::PreviousTrack).await?,
        Commands::Theme { action } => {
            if action.is_some() {
                controller.toggle_theme().await?;
            }
            println!("{} {}", controller.theme().glyph(), controller.theme());
            return Ok(());
        }
        Commands::Timezone { name, list } => {
            if let Some(name) = name {
                controller.set_time_zone(&name).await?;
            }
            if list {
                for option in controller.time_zone_options() {
                    let marker = if option.selected { "*" } else { " " };
                    println!("{marker} {:<40} {}", option.label, option.value);
                }
            } else {
                println!("{}", controller.time_zone());
            }
            return Ok(());
        }
        Commands::Watch => {
            return controller
                .watch(|view| println!("{view}"))
                .await;
        }
    }

    print!("{}", controller.refresh().await);
    Ok(())
}
