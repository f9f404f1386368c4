use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::{Step, TagTemplate, DEFAULT_TAGMESSAGE_TEMPLATE};
use crate::error::{AutotagError, Result};
use crate::git::Repository;

/// git config section read by git-autotag (e.g. `git config autotag.step`)
pub const CONFIG_SECTION: &str = "autotag";

/// Values taken from the command line; highest resolution priority
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub step: Option<String>,
    pub message: Option<String>,
}

/// Optional TOML configuration file, the tier between the repository git
/// config and the built-in defaults.
///
/// Looked up as `gitautotag.toml` in the current directory, then
/// `.gitautotag.toml` in the user config directory.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct FileConfig {
    pub tagname_template: Option<String>,
    pub tagmessage_template: Option<String>,
    pub pull_before_tagging: Option<bool>,
    pub push_after_tagging: Option<bool>,
    pub remote_name: Option<String>,
    pub step: Option<String>,
    pub minimum_version: Option<String>,
}

/// Loads the configuration file or returns an empty one.
///
/// Lookup order:
/// 1. Custom path provided as parameter
/// 2. `gitautotag.toml` in the current directory
/// 3. `.gitautotag.toml` in the user config directory
pub fn load_file_config(config_path: Option<&str>) -> Result<FileConfig> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gitautotag.toml").exists() {
        fs::read_to_string("./gitautotag.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".gitautotag.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(FileConfig::default());
        }
    } else {
        return Ok(FileConfig::default());
    };

    toml::from_str(&config_str)
        .map_err(|e| AutotagError::config(format!("cannot parse configuration file: {}", e)))
}

/// Parse a git-config style boolean value
pub fn to_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "y"
    )
}

/// Fully resolved configuration.
///
/// Many tags reference one `Config` during a run; the templates are validated
/// and compiled exactly once, before any git mutation.
#[derive(Debug, Clone)]
pub struct Config {
    pub tagname_template: TagTemplate,
    pub tagmessage_template: String,
    pub pull_before_tagging: bool,
    pub push_after_tagging: bool,
    pub remote_name: String,
    pub step: Step,
    pub minimum_version: Option<semver::Version>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tagname_template: TagTemplate::default(),
            tagmessage_template: DEFAULT_TAGMESSAGE_TEMPLATE.to_string(),
            pull_before_tagging: false,
            push_after_tagging: false,
            remote_name: "origin".to_string(),
            step: Step::Minor,
            minimum_version: None,
        }
    }
}

impl Config {
    /// Resolve every configuration value with the precedence CLI argument →
    /// repository git config (section `autotag`) → configuration file →
    /// built-in default.
    pub fn resolve(
        cli: &CliOverrides,
        repo: &dyn Repository,
        file: &FileConfig,
    ) -> Result<Config> {
        let tagname_template =
            match lookup(None, repo, "tagname_template", file.tagname_template.clone())? {
                Some(value) => TagTemplate::new(value)?,
                None => TagTemplate::default(),
            };

        let tagmessage_template = lookup(
            cli.message.as_deref(),
            repo,
            "tagmessage_template",
            file.tagmessage_template.clone(),
        )?
        .unwrap_or_else(|| DEFAULT_TAGMESSAGE_TEMPLATE.to_string());

        let pull_before_tagging = match repo.config_value(CONFIG_SECTION, "pull_before_tagging")? {
            Some(raw) => to_bool(&raw),
            None => file.pull_before_tagging.unwrap_or(false),
        };

        let push_after_tagging = match repo.config_value(CONFIG_SECTION, "push_after_tagging")? {
            Some(raw) => to_bool(&raw),
            None => file.push_after_tagging.unwrap_or(false),
        };

        let remote_name = lookup(None, repo, "remote_name", file.remote_name.clone())?
            .unwrap_or_else(|| "origin".to_string());

        let step = match lookup(cli.step.as_deref(), repo, "step", file.step.clone())? {
            Some(value) => Step::parse(&value)?,
            None => Step::Minor,
        };

        let minimum_version =
            match lookup(None, repo, "minimum_version", file.minimum_version.clone())? {
                Some(raw) => Some(semver::Version::parse(&raw).map_err(|e| {
                    AutotagError::config(format!("invalid minimum_version '{}': {}", raw, e))
                })?),
                None => None,
            };

        Ok(Config {
            tagname_template,
            tagmessage_template,
            pull_before_tagging,
            push_after_tagging,
            remote_name,
            step,
            minimum_version,
        })
    }
}

/// One three-tier lookup: CLI value, then git config, then file value.
/// The caller applies the built-in default.
fn lookup(
    cli: Option<&str>,
    repo: &dyn Repository,
    key: &str,
    file: Option<String>,
) -> Result<Option<String>> {
    if let Some(value) = cli {
        return Ok(Some(value.to_string()));
    }
    if let Some(value) = repo.config_value(CONFIG_SECTION, key)? {
        return Ok(Some(value));
    }
    Ok(file)
}
