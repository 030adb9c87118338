use clap::Parser;
use ninna::{Cli, Commands, GenerationOutcome, NinnaConfig, StoryRequest, build_engine};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    ninna::init_telemetry();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            request,
            output,
            provider,
        } => {
            generate(request, output, provider).await?;
        }
        Commands::Config => {
            let config = NinnaConfig::load()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

async fn generate(
    request: PathBuf,
    output: Option<PathBuf>,
    provider: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = NinnaConfig::load()?;
    if let Some(provider) = provider {
        config.provider.active = provider;
    }

    let raw = if request.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin())?
    } else {
        std::fs::read_to_string(&request)?
    };
    let story_request: StoryRequest = serde_json::from_str(&raw)?;

    let engine = build_engine(&config)?;
    match engine.generate(story_request).await? {
        GenerationOutcome::Story(response) => {
            let rendered = serde_json::to_string_pretty(&response)?;
            match output {
                Some(path) => std::fs::write(path, rendered)?,
                None => println!("{rendered}"),
            }
        }
        GenerationOutcome::Denied => {
            eprintln!("Daily story quota exhausted; try again tomorrow.");
            std::process::exit(2);
        }
    }

    Ok(())
}
