use super::*;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

#[test]
fn test_load_inputs() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[inputs]
pattern = "^(feat|fix): "
flags = "i"
error = "Use conventional commits."
excludeDescription = true
checkAllCommitMessages = true
excludeUsers = ["dependabot[bot]", "renovate"]
"#
    )
    .unwrap();

    let config = AppConfig::load(file.path()).unwrap();

    assert_eq!(config.inputs.pattern.as_deref(), Some("^(feat|fix): "));
    assert_eq!(config.inputs.flags.as_deref(), Some("i"));
    assert_eq!(
        config.inputs.error.as_deref(),
        Some("Use conventional commits.")
    );
    assert_eq!(config.inputs.exclude_title, None);
    assert_eq!(config.inputs.exclude_description, Some(true));
    assert_eq!(config.inputs.check_all_commit_messages, Some(true));
    assert_eq!(
        config.inputs.exclude_users,
        Some(UserList::List(vec![
            "dependabot[bot]".to_string(),
            "renovate".to_string()
        ]))
    );
}

#[test]
fn test_user_list_as_text() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[inputs]\nexcludeUsers = \"jane, john\"\n").unwrap();

    let config = AppConfig::load(file.path()).unwrap();

    let users = config.inputs.exclude_users.unwrap();
    assert_eq!(users, UserList::Text("jane, john".to_string()));
    assert_eq!(users.to_input(), "jane, john");
}

#[test]
fn test_user_list_to_input() {
    let users = UserList::List(vec!["jane".to_string(), "john".to_string()]);

    assert_eq!(users.to_input(), "jane,john");
}

#[test]
fn test_empty_file_uses_defaults() {
    let file = NamedTempFile::new().unwrap();

    let config = AppConfig::load(file.path()).unwrap();

    assert_eq!(config.inputs, InputsConfig::default());
}

#[test]
fn test_invalid_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[inputs]\npattern = 12\n").unwrap();

    let err = AppConfig::load(file.path()).expect_err("load should fail");

    assert!(err.to_string().contains("Failed to parse configuration file"));
}

#[test]
fn test_load_optional_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(DEFAULT_CONFIG_FILENAME);

    let config = AppConfig::load_optional(&path, false).unwrap();
    assert_eq!(config.inputs, InputsConfig::default());

    let err = AppConfig::load_optional(&path, true).expect_err("load should fail");
    assert!(err.to_string().contains("Configuration file not found"));
}

#[test]
fn test_get_config_path() {
    assert_eq!(
        get_config_path(Some("custom.toml")),
        PathBuf::from("custom.toml")
    );
    assert!(get_config_path(None).ends_with(DEFAULT_CONFIG_FILENAME));
}
