use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use envscan_core::{Analyzer, Config, TextReport};
use inquire::{InquireError, Text};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "envscan", version, about = "Heat-stress and air-quality report for a place")]
pub struct Cli {
    /// Log pipeline steps to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print current conditions for a place.
    Report {
        /// Place name, e.g. "Paris, France". Prompted for when omitted.
        place: Vec<String>,
    },

    /// Inspect or create the configuration file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the config file location.
    Path,
    /// Print the effective configuration.
    Show,
    /// Write the default configuration to disk.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Report { place } => {
                let place = match place_from_args(&place) {
                    Some(p) => p,
                    None => prompt_place()?,
                };

                let config = Config::load()?;
                let analyzer = Analyzer::from_config(&config)?;

                println!("\nAnalyzing '{place}'...");
                let analysis = analyzer.analyze(&place).await?;

                println!("\n{}", TextReport::new(&analysis));
            }
            Command::Config { action } => run_config(action)?,
        }

        Ok(())
    }
}

fn run_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => println!("{}", Config::config_file_path()?.display()),
        ConfigAction::Show => print!("{}", Config::load()?.to_toml()?),
        ConfigAction::Init { force } => {
            let path = Config::config_file_path()?;
            if path.exists() && !force {
                return Err(anyhow!(
                    "Config file already exists: {}\nHint: pass --force to overwrite it.",
                    path.display()
                ));
            }
            let path = Config::default().save()?;
            println!("Wrote default configuration to {}", path.display());
        }
    }
    Ok(())
}

/// Join positional words into one place name; `None` when nothing usable
/// was given.
fn place_from_args(words: &[String]) -> Option<String> {
    let joined = words.join(" ");
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn prompt_place() -> Result<String> {
    let answer = Text::new("Enter a location:")
        .with_help_message("e.g. 'Paris, France', 'New York City', 'Tokyo'")
        .prompt();

    match answer {
        Ok(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        Ok(_) => Err(anyhow!("Location cannot be empty.")),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            Err(anyhow!("Operation cancelled by user."))
        }
        Err(InquireError::NotTTY) => Err(anyhow!(
            "No input provided.\nHint: pass the location as arguments, e.g. `envscan report Paris, France`."
        )),
        Err(e) => Err(anyhow!("Failed to read location: {e}")),
    }
}
