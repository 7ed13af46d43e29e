//! Archive location templates
//!
//! A template is a URL with `{project}`, `{repo}` and `{version}`
//! placeholders, e.g. `https://github.com/ezpkgm/{repo}/archive/refs/tags/{version}.zip`.

use std::fmt;
use std::str::FromStr;

use crate::error::{EzpkgmError, Result, config_invalid};
use crate::registry::ProjectRecord;

/// Default archive location
pub const DEFAULT_URL_TEMPLATE: &str =
    "https://github.com/ezpkgm/{repo}/archive/refs/tags/{version}.zip";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Project,
    Repo,
    Version,
}

/// Parsed archive URL template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl UrlTemplate {
    /// Parse a template, rejecting unknown or unterminated placeholders
    pub fn parse(template: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| {
                config_invalid(format!("unterminated placeholder in URL template '{template}'"))
            })?;
            segments.push(match &after[..close] {
                "project" => Segment::Project,
                "repo" => Segment::Repo,
                "version" => Segment::Version,
                other => {
                    return Err(config_invalid(format!(
                        "unknown placeholder '{{{other}}}' in URL template '{template}' \
                         (expected {{project}}, {{repo}} or {{version}})"
                    )));
                }
            });
            rest = &after[close + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        let parsed = Self {
            source: template.to_string(),
            segments,
        };
        parsed.validate_scheme()?;
        Ok(parsed)
    }

    /// Fill in the placeholders for one project
    pub fn render(&self, project: &str, record: &ProjectRecord) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.as_str(),
                Segment::Project => project,
                Segment::Repo => record.repo.as_str(),
                Segment::Version => record.version.as_str(),
            })
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    fn validate_scheme(&self) -> Result<()> {
        let sample = self.render("project", &ProjectRecord::new("repo", "v0", ""));
        match reqwest::Url::parse(&sample) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            Ok(url) => Err(config_invalid(format!(
                "URL template '{}' uses unsupported scheme '{}'",
                self.source,
                url.scheme()
            ))),
            Err(e) => Err(config_invalid(format!(
                "URL template '{}' is not a valid URL: {e}",
                self.source
            ))),
        }
    }
}

impl Default for UrlTemplate {
    fn default() -> Self {
        Self {
            source: DEFAULT_URL_TEMPLATE.to_string(),
            segments: vec![
                Segment::Literal("https://github.com/ezpkgm/".to_string()),
                Segment::Repo,
                Segment::Literal("/archive/refs/tags/".to_string()),
                Segment::Version,
                Segment::Literal(".zip".to_string()),
            ],
        }
    }
}

impl FromStr for UrlTemplate {
    type Err = EzpkgmError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
