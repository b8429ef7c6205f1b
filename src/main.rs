use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use voyageai::chat::ChatSession;
use voyageai::config::DefaultsConfig;
use voyageai::render::{self, View};
use voyageai::{Category, GeminiClient, PlacesClient, SearchQuery, VoyageConfig, VoyageError};

#[derive(Debug, Parser)]
#[command(name = "voyageai", version)]
#[command(about = "Hotels, restaurants and sights near a destination, with a travel chat")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search a destination and render the results
    Search {
        #[command(flatten)]
        target: Target,

        #[arg(long, value_enum, default_value_t = View::List)]
        view: View,

        /// Category for the list view: hotel, restaurant or tourist
        #[arg(long, value_parser = parse_category, default_value = "hotel")]
        category: Category,

        /// Write the rendering to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Search a destination, then chat about the results
    Chat {
        #[command(flatten)]
        target: Target,
    },
}

#[derive(Debug, Args)]
struct Target {
    #[arg(short, long)]
    destination: String,

    /// Minimum rating, 0.5 to 4.5
    #[arg(long)]
    min_rating: Option<f64>,

    /// Search radius in meters, 500 to 50000
    #[arg(long)]
    radius: Option<u32>,
}

impl Target {
    fn query(&self, defaults: &DefaultsConfig) -> voyageai::Result<SearchQuery> {
        SearchQuery::new(
            self.destination.as_str(),
            self.min_rating.unwrap_or(defaults.min_rating),
            self.radius.unwrap_or(defaults.radius_meters),
        )
    }
}

fn parse_category(value: &str) -> Result<Category, String> {
    Category::from_label(value)
        .ok_or_else(|| format!("unknown category '{value}', expected hotel, restaurant or tourist"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = e
                .downcast_ref::<VoyageError>()
                .map_or_else(|| format!("{e:#}"), VoyageError::user_message);
            eprintln!("❌ {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = VoyageConfig::load_from_path(cli.config)?;
    voyageai::logging::init(&config.logging, cli.verbose);
    info!("Starting VoyageAI v{}", voyageai::VERSION);

    let mut places = PlacesClient::new(&config.places, &config.cache)?;

    match cli.command {
        Commands::Search {
            target,
            view,
            category,
            output,
        } => {
            let query = target.query(&config.defaults)?;
            let results = places.search(&query).await?;
            let rendered = render::render(&results, view, category)?;

            match output {
                Some(path) => render::write_output(&path, &rendered).await?,
                None => println!("{rendered}"),
            }
        }
        Commands::Chat { target } => {
            let query = target.query(&config.defaults)?;
            let results = places.search(&query).await?;
            let model = GeminiClient::new(&config.gemini)?;
            chat_loop(ChatSession::new(results, model)).await?;
        }
    }

    Ok(())
}

async fn chat_loop(mut session: ChatSession<GeminiClient>) -> anyhow::Result<()> {
    for entry in session.transcript().all() {
        println!("{}", entry.text);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match session.submit(&line).await {
            Ok(answer) => println!("{answer}\n"),
            Err(e) => eprintln!("Sorry, I encountered an error: {}", e.user_message()),
        }
    }

    println!();
    info!("Chat ended after {} turns", session.transcript().len() / 2);
    Ok(())
}
