use std::cmp::Ordering;

use crate::config::Config;
use crate::domain::step::Step;
use crate::domain::template::TagTemplate;
use crate::error::{AutotagError, Result};
use crate::git::Repository;

/// An immutable semantic-version tag value.
///
/// Components are optional: a tag parsed from a template like `"{major}"`
/// carries no minor or patch value. Absence is distinct from zero for
/// validation and ordering, and normalizes to zero for rendering.
/// Incrementing never mutates; it produces a new `Tag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub major: Option<u32>,
    pub minor: Option<u32>,
    pub patch: Option<u32>,
}

impl Tag {
    /// Create a tag from optional components
    pub fn new(major: Option<u32>, minor: Option<u32>, patch: Option<u32>) -> Self {
        Tag {
            major,
            minor,
            patch,
        }
    }

    /// Create a fully specified tag
    pub fn from_parts(major: u32, minor: u32, patch: u32) -> Self {
        Tag::new(Some(major), Some(minor), Some(patch))
    }

    /// The tag with no components, ordered below every non-empty tag
    pub fn empty() -> Self {
        Tag::new(None, None, None)
    }

    /// Enforce that component presence is contiguous from major downward
    pub fn validate(&self) -> Result<()> {
        if self.minor.is_some() && self.major.is_none() {
            return Err(AutotagError::validation(
                "a minor version requires a major version",
            ));
        }
        if self.patch.is_some() && self.minor.is_none() {
            return Err(AutotagError::validation(
                "a patch version requires a major and a minor version",
            ));
        }
        Ok(())
    }

    /// Version components with absent values normalized to zero
    pub fn normalized(&self) -> (u32, u32, u32) {
        (
            self.major.unwrap_or(0),
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
        )
    }

    /// Render the tag name from a template
    pub fn name(&self, template: &TagTemplate) -> String {
        let (major, minor, patch) = self.normalized();
        template.render(major, minor, patch)
    }

    /// Render the tag message, with `{tagname}` available as an extra
    /// substitution variable
    pub fn message(&self, template: &TagTemplate, message_template: &str) -> String {
        let (major, minor, patch) = self.normalized();
        message_template
            .replace("{tagname}", &self.name(template))
            .replace("{major}", &major.to_string())
            .replace("{minor}", &minor.to_string())
            .replace("{patch}", &patch.to_string())
    }

    /// Produce the next tag for the given step.
    ///
    /// The selected component (0 when absent) is incremented by one and every
    /// strictly less significant component is reset to zero.
    pub fn incremented(&self, step: Step) -> Tag {
        match step {
            Step::Major => Tag::new(
                Some(self.major.unwrap_or(0) + 1),
                Some(0),
                Some(0),
            ),
            Step::Minor => Tag::new(self.major, Some(self.minor.unwrap_or(0) + 1), Some(0)),
            Step::Patch => Tag::new(self.major, self.minor, Some(self.patch.unwrap_or(0) + 1)),
        }
    }

    /// Parse a tag name against a compiled template
    pub fn from_name(name: &str, template: &TagTemplate) -> Result<Tag> {
        let caps = template.matcher().captures(name).ok_or_else(|| {
            AutotagError::parse(format!(
                "tag '{}' does not match template '{}'",
                name,
                template.as_str()
            ))
        })?;

        let component = |key: &str| -> Result<Option<u32>> {
            caps.name(key)
                .map(|m| {
                    m.as_str().parse::<u32>().map_err(|_| {
                        AutotagError::parse(format!(
                            "component '{}' of tag '{}' is not a valid number",
                            key, name
                        ))
                    })
                })
                .transpose()
        };

        Ok(Tag::new(
            component("major")?,
            component("minor")?,
            component("patch")?,
        ))
    }

    /// Collect every tag of the repository that matches the template.
    ///
    /// Non-matching tag names are skipped unless `strict` is set, in which
    /// case the first one aborts the whole collection. With `sort` the result
    /// is in ascending version order.
    pub fn collect(
        repo: &dyn Repository,
        template: &TagTemplate,
        sort: bool,
        strict: bool,
    ) -> Result<Vec<Tag>> {
        let mut tags = Vec::new();
        for name in repo.list_tags()? {
            match Tag::from_name(&name, template) {
                Ok(tag) => tags.push(tag),
                Err(err @ AutotagError::CannotParseTag(_)) => {
                    if strict {
                        return Err(err);
                    }
                }
                Err(err) => return Err(err),
            }
        }
        if sort {
            tags.sort();
        }
        Ok(tags)
    }

    /// Create this tag in the repository and optionally push it.
    ///
    /// The existence check is advisory only: another process can create the
    /// same tag between the check and the creation.
    pub fn create(&self, repo: &dyn Repository, config: &Config) -> Result<String> {
        let name = self.name(&config.tagname_template);
        let message = self.message(&config.tagname_template, &config.tagmessage_template);

        if repo.list_tags()?.iter().any(|existing| existing == &name) {
            return Err(AutotagError::TagAlreadyExists(name));
        }

        repo.create_tag(&name, &message)?;

        if config.push_after_tagging {
            repo.push_tag(&config.remote_name, &name)?;
        }

        Ok(name)
    }
}

/// Three-way comparison walking major, then minor, then patch.
///
/// At the first component where exactly one side is present, the present
/// side is greater; when both are present, numeric order decides. Absence
/// only acts as a comparison signal here, never in rendering.
impl Ord for Tag {
    fn cmp(&self, other: &Self) -> Ordering {
        let pairs = [
            (self.major, other.major),
            (self.minor, other.minor),
            (self.patch, other.patch),
        ];
        for (ours, theirs) in pairs {
            let ordering = match (ours, theirs) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Ordering::Equal,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
