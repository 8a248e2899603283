use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = ".commit-message-checker.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Configuration file for the commit message checker
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default values for the inputs of the checker
    #[serde(default)]
    pub inputs: InputsConfig,
}

impl AppConfig {
    /// Load configuration from the specified file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {:?}", path);

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {:?}", path))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file {:?}", path))?;

        Ok(config)
    }

    /// Loads the configuration file if it exists.
    ///
    /// A missing file is only an error when the path was given explicitly.
    pub fn load_optional(path: &Path, explicit: bool) -> Result<Self> {
        if !path.exists() {
            if explicit {
                anyhow::bail!("Configuration file not found: {:?}", path);
            }

            debug!("No configuration file found at {:?}", path);
            return Ok(Self::default());
        }

        let config = Self::load(path)?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }
}

/// Input values read from the `[inputs]` table.
///
/// The access token is only read from the environment or the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputsConfig {
    /// The regular expression every message must match
    #[serde(default)]
    pub pattern: Option<String>,

    /// Regex flags
    #[serde(default)]
    pub flags: Option<String>,

    /// Error text reported when the check fails
    #[serde(default)]
    pub error: Option<String>,

    /// Do not check the pull request title
    #[serde(default)]
    pub exclude_title: Option<bool>,

    /// Do not check the pull request description
    #[serde(default)]
    pub exclude_description: Option<bool>,

    /// Also check every commit of a pull request
    #[serde(default)]
    pub check_all_commit_messages: Option<bool>,

    /// Do not check merge commits
    #[serde(default)]
    pub exclude_merge_commits: Option<bool>,

    /// Authors whose commits are not checked
    #[serde(default)]
    pub exclude_users: Option<UserList>,

    /// Fail when a message matches instead of when it does not
    #[serde(default)]
    pub fail_on_match: Option<bool>,
}

/// A list of users, written either as an array or as a comma separated string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserList {
    /// `["jane", "john"]`
    List(Vec<String>),

    /// `"jane, john"`
    Text(String),
}

impl UserList {
    /// Joins the entries into the comma separated input form.
    pub fn to_input(&self) -> String {
        match self {
            UserList::List(users) => users.join(","),
            UserList::Text(users) => users.clone(),
        }
    }
}

/// Get the path to the configuration file
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        // Look for config in current directory
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}
