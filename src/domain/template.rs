use crate::error::{AutotagError, Result};
use regex::Regex;

pub const DEFAULT_TAGNAME_TEMPLATE: &str = "{major}.{minor}.{patch}";
pub const DEFAULT_TAGMESSAGE_TEMPLATE: &str = "Release {tagname}.";

/// Tag naming template (e.g. "{major}.{minor}.{patch}", "V{major}.{minor}")
///
/// A template is composed of the placeholders `{major}`, `{minor}` and
/// `{patch}` plus literal characters from `[A-Za-z0-9.:,_-]`. Placeholder
/// presence must be contiguous from the most significant component down:
/// `{patch}` requires `{minor}` and `{major}`, `{minor}` requires `{major}`.
///
/// Validation happens on construction, so every `TagTemplate` value carries a
/// compiled matcher for parsing existing tag names back into components.
#[derive(Debug, Clone)]
pub struct TagTemplate {
    template: String,
    matcher: Regex,
}

impl TagTemplate {
    /// Validate and compile a template string
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        validate(&template)?;
        let matcher = compile(&template)?;
        Ok(TagTemplate { template, matcher })
    }

    /// The original template string
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// The compiled matching pattern with named groups `major`/`minor`/`patch`
    pub fn matcher(&self) -> &Regex {
        &self.matcher
    }

    /// Render the template with concrete version components
    pub fn render(&self, major: u32, minor: u32, patch: u32) -> String {
        self.template
            .replace("{major}", &major.to_string())
            .replace("{minor}", &minor.to_string())
            .replace("{patch}", &patch.to_string())
    }
}

impl Default for TagTemplate {
    fn default() -> Self {
        TagTemplate::new(DEFAULT_TAGNAME_TEMPLATE)
            .expect("default tag template is valid")
    }
}

fn is_allowed_literal(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | ':' | ',' | '_' | '-')
}

/// Check template well-formedness without transforming it.
///
/// Scans left to right, consuming a placeholder token ({patch}, {minor},
/// {major}, checked in that order) or a single allowed literal character per
/// iteration, then enforces the significance-order rule over the placeholders
/// that were seen.
fn validate(template: &str) -> Result<()> {
    if template.is_empty() {
        return Err(AutotagError::template("empty tag template provided"));
    }

    let mut rest = template;
    let mut seen_major = false;
    let mut seen_minor = false;
    let mut seen_patch = false;

    while !rest.is_empty() {
        if let Some(stripped) = rest.strip_prefix("{patch}") {
            seen_patch = true;
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("{minor}") {
            seen_minor = true;
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("{major}") {
            seen_major = true;
            rest = stripped;
        } else if let Some(c) = rest.chars().next() {
            if !is_allowed_literal(c) {
                return Err(AutotagError::template(format!(
                    "illegal character '{}' in template string '{}'",
                    c, template
                )));
            }
            rest = &rest[c.len_utf8()..];
        }
    }

    if seen_patch && !(seen_minor && seen_major) {
        return Err(AutotagError::template(format!(
            "template '{}' uses {{patch}} without {{major}} and {{minor}}",
            template
        )));
    }
    if seen_minor && !seen_major {
        return Err(AutotagError::template(format!(
            "template '{}' uses {{minor}} without {{major}}",
            template
        )));
    }

    Ok(())
}

/// Compile a validated template into an anchored matching pattern.
///
/// The whole template is regex-escaped first so literal dots match literally,
/// then the escaped placeholder tokens are substituted with named digit
/// groups.
fn compile(template: &str) -> Result<Regex> {
    let escaped = regex::escape(template);
    let pattern = escaped
        .replace(r"\{major\}", r"(?P<major>\d+)")
        .replace(r"\{minor\}", r"(?P<minor>\d+)")
        .replace(r"\{patch\}", r"(?P<patch>\d+)");

    Regex::new(&format!("^{}$", pattern)).map_err(|e| {
        AutotagError::template(format!("cannot compile template '{}': {}", template, e))
    })
}
