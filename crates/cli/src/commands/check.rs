use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use commit_message_checker_core::config::{
    parse_bool_input, parse_user_list, CheckerConfiguration, PullRequestOptions, DEFAULT_FLAGS,
};
use commit_message_checker_core::{CheckOutcome, CommitMessageChecker};
use commit_message_checker_developer_platforms::github::{create_client, GitHubProvider};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::config::{get_config_path, AppConfig, InputsConfig};
use crate::errors::CliError;

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;

/// Arguments for the check command.
///
/// Every input can also be supplied through the environment variable GitHub
/// Actions uses for the matching action input.
#[derive(Args, Default)]
pub struct CheckArgs {
    /// The regular expression every message must match
    #[arg(long, env = "INPUT_PATTERN")]
    pub pattern: Option<String>,

    /// Regex flags, any of "gimsuy" (default "gm")
    #[arg(long, env = "INPUT_FLAGS")]
    pub flags: Option<String>,

    /// Error text reported when a message fails the check
    #[arg(long, env = "INPUT_ERROR")]
    pub error: Option<String>,

    /// "true" to skip the pull request title
    #[arg(long, env = "INPUT_EXCLUDETITLE")]
    pub exclude_title: Option<String>,

    /// "true" to skip the pull request description
    #[arg(long, env = "INPUT_EXCLUDEDESCRIPTION")]
    pub exclude_description: Option<String>,

    /// "true" to also check every commit of a pull request
    #[arg(long, env = "INPUT_CHECKALLCOMMITMESSAGES")]
    pub check_all_commit_messages: Option<String>,

    /// "true" to skip merge commits
    #[arg(long, env = "INPUT_EXCLUDEMERGECOMMITS")]
    pub exclude_merge_commits: Option<String>,

    /// Token used to read commit history from GitHub
    #[arg(long, env = "INPUT_ACCESSTOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Comma or newline separated authors whose commits are not checked
    #[arg(long, env = "INPUT_EXCLUDEUSERS")]
    pub exclude_users: Option<String>,

    /// "true" to fail when a message matches the pattern
    #[arg(long, env = "INPUT_FAILONMATCH")]
    pub fail_on_match: Option<String>,

    /// Name of the triggering event
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    pub event_name: Option<String>,

    /// Path to the JSON payload of the triggering event
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// GitHub API root
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Alternate config file
    #[arg(short, long)]
    pub config: Option<String>,
}

/// Returns the trimmed value if it is not empty.
fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// First non-empty text of the argument and the file value.
fn text_input(arg: &Option<String>, file: &Option<String>) -> Option<String> {
    non_empty(arg.as_deref()).or_else(|| non_empty(file.as_deref()))
}

/// Boolean input, the argument wins over the file value when it is set.
fn bool_input(arg: &Option<String>, file: Option<bool>) -> bool {
    match non_empty(arg.as_deref()) {
        Some(value) => parse_bool_input(&value),
        None => file.unwrap_or(false),
    }
}

/// Resolves the configuration of the run.
///
/// Command line arguments and environment variables take precedence over the
/// configuration file. Empty values count as not set.
pub fn resolve_configuration(args: &CheckArgs, file: &InputsConfig) -> CheckerConfiguration {
    let exclude_users = non_empty(args.exclude_users.as_deref())
        .or_else(|| file.exclude_users.as_ref().map(|users| users.to_input()))
        .map(|users| parse_user_list(&users))
        .unwrap_or_default();

    CheckerConfiguration {
        pattern: text_input(&args.pattern, &file.pattern).unwrap_or_default(),
        flags: text_input(&args.flags, &file.flags).unwrap_or_else(|| DEFAULT_FLAGS.to_string()),
        error: text_input(&args.error, &file.error).unwrap_or_default(),
        fail_on_match: bool_input(&args.fail_on_match, file.fail_on_match),
        options: PullRequestOptions {
            ignore_title: bool_input(&args.exclude_title, file.exclude_title),
            ignore_description: bool_input(&args.exclude_description, file.exclude_description),
            check_all_commits: bool_input(
                &args.check_all_commit_messages,
                file.check_all_commit_messages,
            ),
            access_token: non_empty(args.access_token.as_deref()),
            exclude_merge_commits: bool_input(
                &args.exclude_merge_commits,
                file.exclude_merge_commits,
            ),
            exclude_users,
        },
    }
}

/// Reads the JSON payload of the triggering event.
///
/// Without a path there is no payload; the checker reports that for the
/// events that need one.
pub fn read_event_payload(path: Option<&Path>) -> Result<Option<Value>, CliError> {
    let Some(path) = path else {
        debug!("No event payload path given");
        return Ok(None);
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read the event payload {:?}", path))
        .map_err(|e| CliError::InvalidArguments(format!("{:#}", e)))?;

    let payload: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse the event payload {:?}", path))
        .map_err(|e| CliError::InvalidArguments(format!("{:#}", e)))?;

    Ok(Some(payload))
}

/// Formats an error as a GitHub Actions `::error::` workflow command.
pub fn workflow_error_command(err: &CliError) -> String {
    let escaped = err
        .detail()
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");

    format!("::error::{}", escaped)
}

/// Executes the check command.
///
/// Loads the optional configuration file, resolves the inputs, reads the
/// event payload and checks the messages of the event.
///
/// # Errors
///
/// Returns a `CliError` if the configuration file or the event payload cannot
/// be read, the GitHub client cannot be created, or the check fails.
#[instrument(skip(args))]
pub async fn execute(args: CheckArgs) -> Result<CheckOutcome, CliError> {
    let config_path = get_config_path(args.config.as_deref());
    let app_config = AppConfig::load_optional(&config_path, args.config.is_some())
        .map_err(|e| CliError::ConfigError(format!("{:#}", e)))?;

    let config = resolve_configuration(&args, &app_config.inputs);
    config.validate()?;

    let event_name = non_empty(args.event_name.as_deref()).ok_or_else(|| {
        CliError::InvalidArguments(
            "No event name given. Set GITHUB_EVENT_NAME or pass --event-name.".to_string(),
        )
    })?;
    let payload = read_event_payload(args.event_path.as_deref())?;

    let client = create_client(
        config.options.access_token.as_deref(),
        non_empty(args.api_url.as_deref()).as_deref(),
    )?;
    let checker = CommitMessageChecker::new(GitHubProvider::new(client));

    info!(event = event_name.as_str(), "Checking the messages of the event");
    let outcome = checker.process_event(&event_name, payload, &config).await?;

    Ok(outcome)
}
