//! Application configuration for Courseboard.
//!
//! User config lives at `~/.courseboard/courseboard.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CourseboardError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "courseboard.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".courseboard";

// ---------------------------------------------------------------------------
// Config structs (matching courseboard.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// GitHub settings: organization, tracked repos, API access.
    #[serde(default)]
    pub github: GithubConfig,

    /// Course grading backend settings.
    #[serde(default)]
    pub course: CourseConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Directory where fetched JSON and the snapshot are written.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> String {
    "var/data".into()
}

/// `[github]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// GitHub REST API base URL.
    #[serde(default = "default_github_api_base")]
    pub api_base: String,

    /// Name of the env var holding the API token (never store the token itself).
    #[serde(default = "default_github_token_env")]
    pub token_env: String,

    /// Organization that owns the cohort repositories.
    #[serde(default)]
    pub organization: String,

    /// Tracked repository names, in ranking order. The list order is the
    /// repository order used when flattening pull records.
    #[serde(default)]
    pub repos: Vec<String>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: default_github_api_base(),
            token_env: default_github_token_env(),
            organization: String::new(),
            repos: Vec::new(),
        }
    }
}

fn default_github_api_base() -> String {
    "https://api.github.com".into()
}
fn default_github_token_env() -> String {
    "GITHUB_TOKEN".into()
}

/// `[course]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseConfig {
    /// Course backend API base URL.
    #[serde(default)]
    pub api_base: String,

    /// Name of the env var holding the backend API key.
    #[serde(default = "default_course_token_env")]
    pub token_env: String,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            token_env: default_course_token_env(),
        }
    }
}

fn default_course_token_env() -> String {
    "COURSE_API_KEY".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.courseboard/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CourseboardError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.courseboard/courseboard.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| CourseboardError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        CourseboardError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| CourseboardError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| CourseboardError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| CourseboardError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Check that the organization and repo list are set before any fetch.
pub fn validate_repos(config: &AppConfig) -> Result<()> {
    if config.github.organization.is_empty() {
        return Err(CourseboardError::config(
            "github.organization is not set. Edit courseboard.toml.",
        ));
    }
    if config.github.repos.is_empty() {
        return Err(CourseboardError::config(
            "github.repos is empty. List the cohort repositories in courseboard.toml.",
        ));
    }
    Ok(())
}

/// Check that the course backend is configured and its API key env var is set.
pub fn validate_course_access(config: &AppConfig) -> Result<()> {
    if config.course.api_base.is_empty() {
        return Err(CourseboardError::config(
            "course.api_base is not set. Edit courseboard.toml.",
        ));
    }
    let var_name = &config.course.token_env;
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(()),
        _ => Err(CourseboardError::config(format!(
            "course API key not found. Set the {var_name} environment variable."
        ))),
    }
}
