use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crontag::{AppError, CrontabSettings, ManagerConfig};

#[derive(Parser)]
#[command(name = "crontag")]
#[command(version)]
#[command(about = "Manage a user's crontab as structured, tagged entries", long_about = None)]
struct Cli {
    /// Path of the crontab executable
    #[arg(long, global = true)]
    crontab: Option<String>,
    /// Manage this account's crontab via sudo
    #[arg(long, global = true)]
    user: Option<String>,
    /// Configuration file
    #[arg(long, global = true, default_value = "crontag.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current crontab
    #[clap(visible_alias = "l")]
    List,
    /// Parse a cron line and persist it into the crontab
    #[clap(visible_alias = "a")]
    Add {
        /// Raw cron line: five schedule fields and a command
        line: String,
    },
    /// Enable or update the jobs of a descriptor file as one group
    #[clap(visible_alias = "e")]
    Enable {
        /// Descriptor file, one cron line per row
        descriptor: PathBuf,
    },
    /// Disable the jobs of a descriptor file
    #[clap(visible_alias = "d")]
    Disable {
        /// Descriptor file, one cron line per row
        descriptor: PathBuf,
    },
    /// Erase the whole crontab
    Erase,
}

fn resolve_settings(cli: &Cli) -> Result<CrontabSettings, AppError> {
    let config = ManagerConfig::load(&cli.config)?;
    let mut settings = config.crontab;
    if let Some(crontab) = &cli.crontab {
        settings.command = crontab.clone();
    }
    if let Some(user) = &cli.user {
        settings.user = Some(user.clone());
    }
    Ok(settings)
}

fn main() {
    let cli = Cli::parse();

    let result: Result<(), AppError> = resolve_settings(&cli).and_then(|settings| {
        match &cli.command {
            Commands::List => {
                let text = crontag::list(&settings)?;
                print!("{text}");
            }
            Commands::Add { line } => {
                let rendered = crontag::add_line(&settings, line)?;
                println!("✅ Added job: {rendered}");
            }
            Commands::Enable { descriptor } => {
                let count = crontag::enable(&settings, descriptor)?;
                println!("✅ Enabled {count} job(s) from {}", descriptor.display());
            }
            Commands::Disable { descriptor } => {
                let count = crontag::disable(&settings, descriptor)?;
                println!("✅ Disabled {count} job(s) from {}", descriptor.display());
            }
            Commands::Erase => {
                crontag::erase(&settings)?;
                println!("✅ Erased crontab");
            }
        }
        Ok(())
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
