use crate::config::toml_config::TomlConfig;
use crate::config::{Settings, SettingsOverrides};
use crate::utils::error::{CourseError, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "course-admin")]
#[command(about = "List, inspect and save courses against a course service")]
pub struct CliConfig {
    /// Course collection endpoint, e.g. http://localhost:8080/api/courses
    #[arg(long)]
    pub api_endpoint: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// How long notifications stay on screen
    #[arg(long)]
    pub notification_ms: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines on stderr")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show every course as a table
    List,
    /// Load one course and report its validation state
    Show { id: String },
    /// Validate a course from a JSON file and save it
    Save {
        file: PathBuf,
        /// Check the course without calling the service
        #[arg(long)]
        dry_run: bool,
    },
}

impl CliConfig {
    pub fn settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => Some(TomlConfig::from_file(path).map_err(|e| CourseError::ConfigError {
                message: format!("cannot load '{}': {}", path.display(), e),
            })?),
            None => None,
        };

        Ok(Settings::resolve(
            file.as_ref(),
            SettingsOverrides {
                api_endpoint: self.api_endpoint.clone(),
                timeout_seconds: self.timeout_seconds,
                notification_ms: self.notification_ms,
            },
        ))
    }
}
