use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use content_generator::{
    api,
    batch,
    config::Config,
    lookup::UNABLE_TO_GENERATE,
    logging,
    tui,
    wiki::{ArticleSource, WikipediaClient},
};

/// Finds a Wikipedia paragraph mentioning two keywords.
///
/// With an INPUT file the lookup runs once in batch mode; without one the
/// interactive form opens.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// CSV file whose `input_keywords` column holds `primary;secondary`
    input: Option<PathBuf>,

    /// Where the result table is written
    #[arg(long)]
    output: Option<PathBuf>,

    /// Serve a single keyword exchange without opening the form
    #[arg(long, conflicts_with = "input")]
    serve_once: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load()?;
    if let Some(output) = cli.output {
        config.output_path = output;
    }

    let source: Arc<dyn ArticleSource> = Arc::new(WikipediaClient::new(config.wiki_api_url.clone()));

    if let Some(input) = cli.input {
        logging::init_stderr()?;
        batch::run(&config, source.as_ref(), &input).await?;
        return Ok(());
    }

    if cli.serve_once {
        logging::init_stderr()?;
        match api::serve_once(&config, source).await? {
            Some(outcome) if outcome.found() => println!("Sent reply:\n{}", outcome.reply),
            Some(_) => println!("{}", UNABLE_TO_GENERATE),
            None => println!("No request received on {}", config.exchange_addr),
        }
        return Ok(());
    }

    let _log_guard = logging::init_file(&config.log_dir)?;
    tracing::info!(api = %config.wiki_api_url, "starting interactive form");
    tui::run(config, source).await?;

    Ok(())
}
