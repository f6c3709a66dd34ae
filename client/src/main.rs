//! RuneMetrics command-line client
//!
//! Usage:
//!   runemetrics profile <PLAYER>
//!   runemetrics quests <PLAYER> [--status completed]
//!   runemetrics eligible <PLAYER>
//!   runemetrics hours <PLAYER> <SKILL> [--target 99] [--detailed]
//!   runemetrics history <PLAYER>
//!   runemetrics audit <PLAYER>

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use runemetrics_engine::{EngineError, QuestStatus};

mod api;
mod commands;
mod config;
mod render;

use api::{ApiError, RuneMetricsClient};
use config::ClientConfig;

#[derive(Parser, Debug)]
#[command(name = "runemetrics")]
#[command(about = "Skill projections and quest eligibility from RuneMetrics profiles")]
struct Cli {
    /// Config file (default: <config dir>/runemetrics/config.toml)
    #[arg(long, global = true, env = "RUNEMETRICS_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory holding rates.json and quest_data.json
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show a player's levels and XP
    Profile { player: String },

    /// List a player's quests
    Quests {
        player: String,

        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },

    /// List not-started quests the player meets every requirement for
    Eligible { player: String },

    /// Estimate hours of training to reach a target level
    Hours {
        player: String,

        /// Skill name, e.g. woodcutting
        skill: String,

        /// Target level (default from config)
        #[arg(long)]
        target: Option<i32>,

        /// Show the per-segment breakdown
        #[arg(long)]
        detailed: bool,
    },

    /// Monthly XP gains for every skill
    History { player: String },

    /// Quests the player has that the prerequisite data does not cover
    Audit { player: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StatusArg {
    NotStarted,
    Started,
    Completed,
}

impl From<StatusArg> for QuestStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::NotStarted => QuestStatus::NotStarted,
            StatusArg::Started => QuestStatus::Started,
            StatusArg::Completed => QuestStatus::Completed,
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ClientConfig::load(cli.config.as_deref())?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data_dir.clone());
    let client = RuneMetricsClient::new(&config);

    match cli.command {
        Commands::Profile { player } => commands::profile(&client, &player),
        Commands::Quests { player, status } => {
            commands::quests(&client, &player, status.map(QuestStatus::from))
        }
        Commands::Eligible { player } => commands::eligible(&client, &data_dir, &player),
        Commands::Hours {
            player,
            skill,
            target,
            detailed,
        } => {
            let target = target.unwrap_or(config.default_target);
            commands::hours(&client, &data_dir, &player, &skill, target, detailed)
        }
        Commands::History { player } => commands::history(&client, &player),
        Commands::Audit { player } => commands::audit(&client, &data_dir, &player),
    }
}

fn is_private_profile(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(cause.downcast_ref::<ApiError>(), Some(ApiError::Unauthorized))
            || matches!(
                cause.downcast_ref::<EngineError>(),
                Some(EngineError::AuthenticationRequired)
            )
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if is_private_profile(&e) {
                eprintln!(
                    "The profile is private. Set RuneMetrics visibility to public and retry."
                );
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_hours() {
        let cli = Cli::try_parse_from([
            "runemetrics", "hours", "Zezima", "woodcutting", "--target", "80", "--detailed",
        ])
        .unwrap();
        match cli.command {
            Commands::Hours {
                player,
                skill,
                target,
                detailed,
            } => {
                assert_eq!(player, "Zezima");
                assert_eq!(skill, "woodcutting");
                assert_eq!(target, Some(80));
                assert!(detailed);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_quest_status() {
        let cli = Cli::try_parse_from([
            "runemetrics", "--data-dir", "/tmp/rm", "quests", "Zezima", "--status", "not-started",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/rm")));
        match cli.command {
            Commands::Quests { status, .. } => {
                assert_eq!(status.map(QuestStatus::from), Some(QuestStatus::NotStarted));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_private_profile_detection() {
        let err = anyhow::Error::from(ApiError::Unauthorized).context("fetching profile");
        assert!(is_private_profile(&err));

        let err = anyhow::Error::from(EngineError::AuthenticationRequired);
        assert!(is_private_profile(&err));

        assert!(!is_private_profile(&anyhow::anyhow!("timeout")));
    }
}
