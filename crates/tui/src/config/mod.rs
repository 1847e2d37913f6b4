use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/budget_tui.toml";
const ENV_PREFIX: &str = "BUDGET_TUI";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub username: String,
    /// JSON file holding the access token between runs.
    pub session_path: String,
    pub currency_symbol: String,
    /// Rows of the dashboard's recent transactions table.
    pub recent_count: usize,
    pub log_file: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            username: String::new(),
            session_path: "config/budget_tui_session.json".to_string(),
            currency_symbol: "₹".to_string(),
            recent_count: engine::aggregate::DEFAULT_RECENT,
            log_file: "budget_tui.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Default, Parser)]
#[command(name = "budget-tracker", disable_version_flag = true)]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    pub config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:8000).
    #[arg(long)]
    pub base_url: Option<String>,
    /// Override username (password is never read from CLI).
    #[arg(long)]
    pub username: Option<String>,
    /// Override where the session token is kept.
    #[arg(long)]
    pub session_path: Option<String>,
    /// Override the log file.
    #[arg(long)]
    pub log_file: Option<String>,
    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    load_from(Args::parse())
}

/// Layers the TOML file, then `BUDGET_TUI_*` variables, then CLI flags.
pub fn load_from(args: Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(username) = args.username {
        settings.username = username;
    }
    if let Some(session_path) = args.session_path {
        settings.session_path = session_path;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = load_from(Args {
            config: Some("does/not/exist.toml".to_string()),
            ..Args::default()
        })
        .unwrap();

        assert_eq!(settings.currency_symbol, "₹");
        assert_eq!(settings.recent_count, 5);
    }

    #[test]
    fn flags_override_file_values() {
        let settings = load_from(Args {
            config: Some("does/not/exist.toml".to_string()),
            base_url: Some("http://budget.local/".to_string()),
            username: Some("asha".to_string()),
            log_level: Some("debug".to_string()),
            ..Args::default()
        })
        .unwrap();

        assert_eq!(settings.base_url, "http://budget.local/");
        assert_eq!(settings.username, "asha");
        assert_eq!(settings.log_level, "debug");
    }
}
