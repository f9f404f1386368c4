use crate::error::{AutotagError, Result};
use git2::{Oid, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open the repository at an explicit path.
    ///
    /// Unlike [Git2Repository::discover] this does not walk up the directory
    /// tree: the path itself must be a git repository.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::open(path.as_ref()).map_err(|_| {
            AutotagError::repository(format!(
                "Path {} does not point to a git repository.",
                path.as_ref().display()
            ))
        })?;
        Ok(Git2Repository { repo })
    }

    /// Discover the repository from the current working directory, walking
    /// up the directory tree.
    pub fn discover() -> Result<Self> {
        let repo = Git2Repo::discover(".").map_err(|_| {
            AutotagError::repository(
                "Neither the current working directory nor its parents are a git repository.",
            )
        })?;
        Ok(Git2Repository { repo })
    }

    /// Create from an existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Credential lookup shared by fetch, pull and push: SSH keys from
    /// ~/.ssh/, then the SSH agent, then default credentials.
    fn remote_callbacks<'a>() -> git2::RemoteCallbacks<'a> {
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                let key_paths = vec![
                    format!("{}/.ssh/id_ed25519", home),
                    format!("{}/.ssh/id_rsa", home),
                    format!("{}/.ssh/id_ecdsa", home),
                ];

                for key_path in key_paths {
                    let path = std::path::Path::new(&key_path);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(
                            username_from_url.unwrap_or("git"),
                            None,
                            path,
                            None,
                        ) {
                            return Ok(cred);
                        }
                    }
                }

                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });
        callbacks
    }

    /// Fast-forward the currently checked out branch to its remote-tracking
    /// counterpart, when that is possible.
    ///
    /// Diverged branches and detached HEAD are left untouched.
    fn fast_forward_current_branch(&self, remote_name: &str) -> Result<()> {
        let head = self.repo.head()?;
        if !head.is_branch() {
            return Ok(());
        }
        let branch_name = match head.shorthand() {
            Some(name) => name.to_string(),
            None => return Ok(()),
        };

        let remote_ref_name = format!("refs/remotes/{}/{}", remote_name, branch_name);
        let remote_ref = match self.repo.find_reference(&remote_ref_name) {
            Ok(r) => r,
            // No remote counterpart, nothing to update
            Err(_) => return Ok(()),
        };

        let remote_oid = remote_ref.target().ok_or_else(|| {
            AutotagError::remote(format!("Remote reference {} is invalid", remote_ref_name))
        })?;

        let local_oid = match head.target() {
            Some(oid) => oid,
            None => return Ok(()),
        };

        if local_oid == remote_oid {
            return Ok(());
        }

        let can_fast_forward = self.repo.graph_descendant_of(remote_oid, local_oid)?;
        if !can_fast_forward {
            // Local branch is ahead or has diverged
            return Ok(());
        }

        let branch_ref_name = format!("refs/heads/{}", branch_name);
        let mut reference = self.repo.find_reference(&branch_ref_name)?;
        reference.set_target(
            remote_oid,
            &format!("fast-forward from {}/{}", remote_name, branch_name),
        )?;

        Ok(())
    }

    fn head_oid(&self) -> Result<Oid> {
        let head = self.repo.head()?;
        head.target()
            .ok_or_else(|| AutotagError::repository("HEAD is detached or invalid"))
    }
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;
        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        let oid = self.head_oid()?;
        let object = self.repo.find_object(oid, None)?;
        let signature = self.repo.signature()?;

        match self.repo.tag(name, &object, &signature, message, false) {
            Ok(_) => Ok(()),
            Err(e) if e.code() == git2::ErrorCode::Exists => {
                Err(AutotagError::TagAlreadyExists(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn fetch_tags(&self, remote: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote)
            .map_err(|_| AutotagError::remote(format!("Remote '{}' not found", remote)))?;

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(Self::remote_callbacks());

        remote
            .fetch(
                &["+refs/tags/*:refs/tags/*"],
                Some(&mut fetch_options),
                None,
            )
            .map_err(|e| AutotagError::remote(format!("Fetch failed: {}", e)))?;

        Ok(())
    }

    fn pull(&self, remote_name: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|_| AutotagError::remote(format!("Remote '{}' not found", remote_name)))?;

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(Self::remote_callbacks());

        // Fetch all branches and all tags from the remote
        let refspec_heads = format!("+refs/heads/*:refs/remotes/{}/*", remote_name);
        let refspecs = &[refspec_heads.as_str(), "+refs/tags/*:refs/tags/*"];
        remote
            .fetch(refspecs, Some(&mut fetch_options), None)
            .map_err(|e| {
                AutotagError::remote(format!(
                    "Failed to fetch from remote '{}': {}",
                    remote_name, e
                ))
            })?;

        self.fast_forward_current_branch(remote_name)
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote)
            .map_err(|_| AutotagError::remote(format!("Remote '{}' not found", remote)))?;

        let mut push_options = git2::PushOptions::new();
        let mut callbacks = Self::remote_callbacks();

        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                Err(git2::Error::from_str(&format!(
                    "Push failed for {}: {}",
                    refname, status
                )))
            } else {
                Ok(())
            }
        });
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/tags/{}", name);
        remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| {
                if e.class() == git2::ErrorClass::Net {
                    AutotagError::remote(format!("Network error during push: {}", e))
                } else {
                    AutotagError::remote(format!("Failed to push tag '{}': {}", name, e))
                }
            })?;

        Ok(())
    }

    fn config_value(&self, section: &str, key: &str) -> Result<Option<String>> {
        let config = self.repo.config()?.snapshot()?;
        match config.get_string(&format!("{}.{}", section, key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

// SAFETY: Git2Repository wraps git2::Repository which is Send.
// All access goes through &self methods backed by libgit2's thread-safe
// object database; no interior caches are shared across calls.
unsafe impl Sync for Git2Repository {}

impl std::fmt::Debug for Git2Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git2Repository").finish_non_exhaustive()
    }
}
