//! Exclusion rules read from the template's `.syncrepoignore`
//!
//! The file format follows `.gitignore` closely:
//!
//! - `#` starts a comment that runs to the end of the line
//! - a leading `!` re-includes paths matched by earlier rules
//! - a trailing `/` marks a directory rule, which also covers everything beneath it
//! - a leading `/` anchors the pattern to the template root
//! - `*`, `?`, `**` and `[...]` are glob wildcards
//!
//! Rules are evaluated in file order and the last matching rule decides.

mod rule;

pub use rule::IgnoreRule;

/// Parse exclusion file content into rules, in file order.
pub fn parse(content: &str) -> Vec<IgnoreRule> {
    content.lines().filter_map(IgnoreRule::parse_line).collect()
}

/// Whether `path` is excluded by `rules`.
///
/// Every rule is consulted; each match sets the verdict to `!negate`, so a
/// later rule overrides an earlier one. No rules means nothing is ignored.
pub fn is_ignored(path: &str, rules: &[IgnoreRule]) -> bool {
    rules.iter().fold(false, |ignored, rule| {
        if rule.matches(path) {
            !rule.negate()
        } else {
            ignored
        }
    })
}

/// Ordered rule set loaded from one exclusion file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    rules: Vec<IgnoreRule>,
}

impl IgnoreList {
    pub fn from_content(content: &str) -> Self {
        Self {
            rules: parse(content),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        is_ignored(path, &self.rules)
    }
}
