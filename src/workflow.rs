//! Tagging workflow orchestration
//!
//! Ties the pieces together: optionally pull, collect and sort the existing
//! tags, increment the latest one per the configured step, then create and
//! optionally push the new tag.

use crate::config::Config;
use crate::domain::{Step, Tag};
use crate::error::Result;
use crate::git::Repository;

/// Outcome of a tagging run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The rendered tag name
    pub tag: String,

    /// The rendered tag message
    pub message: String,

    /// Whether the tag was pushed to the configured remote
    pub pushed: bool,

    /// Whether this was a dry run (nothing created)
    pub dry_run: bool,
}

/// Run the tagging workflow against an opened repository.
pub fn run(repo: &dyn Repository, config: &Config, dry_run: bool) -> Result<WorkflowResult> {
    if config.pull_before_tagging {
        repo.pull(&config.remote_name)?;
    }

    let tags = Tag::collect(repo, &config.tagname_template, true, false)?;
    let baseline = match tags.last() {
        Some(latest) => latest.clone(),
        None => match &config.minimum_version {
            Some(floor) => floor_baseline(floor, config.step),
            None => Tag::empty(),
        },
    };

    let next = baseline.incremented(config.step);
    let message = next.message(&config.tagname_template, &config.tagmessage_template);

    if dry_run {
        return Ok(WorkflowResult {
            tag: next.name(&config.tagname_template),
            message,
            pushed: false,
            dry_run: true,
        });
    }

    let tag = next.create(repo, config)?;
    Ok(WorkflowResult {
        tag,
        message,
        pushed: config.push_after_tagging,
        dry_run: false,
    })
}

/// Baseline for the first tag of a repository with a configured version
/// floor.
///
/// The step component is backed off by one so the subsequent increment lands
/// on the floor boundary: floor `17.2.1` with step `major` yields a baseline
/// of `16.2.1`, and the first created tag is `17.0.0`.
fn floor_baseline(floor: &semver::Version, step: Step) -> Tag {
    let major = floor.major as u32;
    let minor = floor.minor as u32;
    let patch = floor.patch as u32;
    match step {
        Step::Major => Tag::from_parts(major.saturating_sub(1), minor, patch),
        Step::Minor => Tag::from_parts(major, minor.saturating_sub(1), patch),
        Step::Patch => Tag::from_parts(major, minor, patch.saturating_sub(1)),
    }
}
