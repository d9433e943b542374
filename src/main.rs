// SPDX-License-Identifier: MIT

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use hike_butler::butler::config::app_settings;
use hike_butler::butler::server::{self, AppState, PrepareRequest, ReviewRequest};
use hike_butler::butler::storage::RelationalStore;
use hike_butler::butler::workflow::{build_preparation_workflow, build_review_workflow};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the web UI
    Serve {
        /// Bind address (defaults to server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run the preparation phase once
    Prepare {
        #[arg(short, long)]
        location: String,

        #[arg(short, long, default_value = "One day")]
        duration: String,

        #[arg(long, default_value = "Moderate")]
        difficulty: String,

        #[arg(short, long, default_value = "default_user")]
        user_id: String,
    },
    /// Run the review phase once
    Review {
        /// GPX track file
        #[arg(short, long)]
        gpx: Option<PathBuf>,

        /// Photo file, repeatable
        #[arg(long = "photo")]
        photos: Vec<PathBuf>,

        #[arg(short, long)]
        thoughts: String,

        #[arg(short, long, default_value = "default_user")]
        user_id: String,
    },
    /// Create the relational tables
    InitDb,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    if let Err(e) = run(Args::parse()).await {
        log::error!("hike-butler failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let settings = app_settings()?;
    log::info!("Starting {} v{}", settings.app.name, settings.app.version);

    match args.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or(settings.server.host);
            let port = port.unwrap_or(settings.server.port);
            let state = AppState::from_settings(&settings.workflow).await?;
            server::serve(state, &host, port).await?;
        }
        Commands::Prepare {
            location,
            duration,
            difficulty,
            user_id,
        } => {
            let graph = build_preparation_workflow(&settings.workflow).await?;
            let response = server::prepare_hiking(
                &graph,
                PrepareRequest {
                    location,
                    duration,
                    difficulty,
                    user_id,
                },
            )
            .await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Review {
            gpx,
            photos,
            thoughts,
            user_id,
        } => {
            let gpx = match gpx {
                Some(path) => Some(tokio::fs::read_to_string(&path).await?),
                None => None,
            };
            let photos = (!photos.is_empty()).then(|| {
                photos
                    .iter()
                    .map(|p| p.to_string_lossy().into_owned())
                    .collect()
            });

            let graph = build_review_workflow(&settings.workflow).await?;
            let response = server::review_hiking(
                &graph,
                ReviewRequest {
                    gpx,
                    photos,
                    thoughts,
                    user_id,
                },
            )
            .await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::InitDb => {
            let store = RelationalStore::from_settings(&settings.database.sqlite).await?;
            store.init_tables().await?;
            log::info!("Initialized tables at {}", settings.database.sqlite.url);
            store.close().await;
        }
    }

    Ok(())
}
