use crate::error::{AutotagError, Result};
use crate::git::Repository;
use std::collections::HashMap;
use std::sync::Mutex;

/// Mock repository for testing without actual git operations.
///
/// Tags and config values are seeded up front; created and pushed tags are
/// recorded so tests can assert on side effects.
pub struct MockRepository {
    tags: Mutex<Vec<String>>,
    config: HashMap<String, String>,
    created: Mutex<Vec<(String, String)>>,
    pushed: Mutex<Vec<(String, String)>>,
    fetched_remotes: Mutex<Vec<String>>,
    pulled_remotes: Mutex<Vec<String>>,
    fail_remote_ops: bool,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            tags: Mutex::new(Vec::new()),
            config: HashMap::new(),
            created: Mutex::new(Vec::new()),
            pushed: Mutex::new(Vec::new()),
            fetched_remotes: Mutex::new(Vec::new()),
            pulled_remotes: Mutex::new(Vec::new()),
            fail_remote_ops: false,
        }
    }

    /// Seed an existing tag
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.lock().unwrap().push(name.into());
    }

    /// Seed a git config value
    pub fn set_config(
        &mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.config
            .insert(format!("{}.{}", section.into(), key.into()), value.into());
    }

    /// Make every fetch/pull/push fail, simulating an unreachable remote
    pub fn fail_remote_ops(&mut self) {
        self.fail_remote_ops = true;
    }

    /// Tags created through this mock, as (name, message) pairs
    pub fn created_tags(&self) -> Vec<(String, String)> {
        self.created.lock().unwrap().clone()
    }

    /// Tags pushed through this mock, as (remote, name) pairs
    pub fn pushed_tags(&self) -> Vec<(String, String)> {
        self.pushed.lock().unwrap().clone()
    }

    /// Remotes that were fetched from
    pub fn fetched_remotes(&self) -> Vec<String> {
        self.fetched_remotes.lock().unwrap().clone()
    }

    /// Remotes that were pulled from
    pub fn pulled_remotes(&self) -> Vec<String> {
        self.pulled_remotes.lock().unwrap().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.lock().unwrap().clone())
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        let mut tags = self.tags.lock().unwrap();
        if tags.iter().any(|t| t == name) {
            return Err(AutotagError::TagAlreadyExists(name.to_string()));
        }
        tags.push(name.to_string());
        self.created
            .lock()
            .unwrap()
            .push((name.to_string(), message.to_string()));
        Ok(())
    }

    fn fetch_tags(&self, remote: &str) -> Result<()> {
        if self.fail_remote_ops {
            return Err(AutotagError::remote(format!(
                "cannot reach remote '{}'",
                remote
            )));
        }
        self.fetched_remotes.lock().unwrap().push(remote.to_string());
        Ok(())
    }

    fn pull(&self, remote: &str) -> Result<()> {
        if self.fail_remote_ops {
            return Err(AutotagError::remote(format!(
                "cannot reach remote '{}'",
                remote
            )));
        }
        self.pulled_remotes.lock().unwrap().push(remote.to_string());
        Ok(())
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        if self.fail_remote_ops {
            return Err(AutotagError::remote(format!(
                "cannot reach remote '{}'",
                remote
            )));
        }
        self.pushed
            .lock()
            .unwrap()
            .push((remote.to_string(), name.to_string()));
        Ok(())
    }

    fn config_value(&self, section: &str, key: &str) -> Result<Option<String>> {
        Ok(self.config.get(&format!("{}.{}", section, key)).cloned())
    }
}
