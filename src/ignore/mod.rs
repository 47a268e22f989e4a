//! Ignore-specification support.
//!
//! One rule per line: `FILE_PATTERN` suppresses a whole file,
//! `FILE_PATTERN: DECLARATION_PATTERN` suppresses matching declarations
//! within matching files. Patterns are regexes, or exact strings when
//! double-quoted. Blank lines and `#` comments are skipped.

use regex::Regex;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// A compiled matcher: quoted patterns match as plain substrings and never
/// touch the regex engine, everything else compiles as a regex.
///
/// Both variants use "matches anywhere in the subject" semantics; a regex
/// pattern can anchor itself for a full-span match.
#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(String),
    Regex(Regex),
}

impl Pattern {
    pub fn parse(raw: &str) -> Result<Self, regex::Error> {
        if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
            Ok(Pattern::Literal(raw[1..raw.len() - 1].to_string()))
        } else {
            Regex::new(raw).map(Pattern::Regex)
        }
    }

    pub fn is_match(&self, subject: &str) -> bool {
        match self {
            Pattern::Literal(text) => subject.contains(text.as_str()),
            Pattern::Regex(regex) => regex.is_match(subject),
        }
    }
}

/// Error for a single unusable ignore-file line
#[derive(Debug, Error)]
pub enum RuleParseError {
    #[error("invalid pattern in ignore rule {line:?}: {source}")]
    InvalidPattern {
        line: String,
        #[source]
        source: regex::Error,
    },
}

/// One rule of the ignore specification. Immutable; whether a rule ever
/// fired is tracked separately in [`RuleUsage`].
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    /// The line as written, trimmed, trailing comment removed
    pub raw_line: String,

    file_raw: String,
    declaration_raw: Option<String>,
    file_pattern: Pattern,
    declaration_pattern: Option<Pattern>,
}

impl IgnoreRule {
    /// Parse one line. Returns `None` for blank lines and whole-line
    /// comments; `Err` when a pattern does not compile.
    pub fn parse(line: &str) -> Result<Option<Self>, RuleParseError> {
        let cleaned = match line.find('#') {
            Some(index) => &line[..index],
            None => line,
        };
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return Ok(None);
        }

        let (file_raw, declaration_raw) = match cleaned.split_once(": ") {
            Some((file, declaration)) => (file.to_string(), Some(declaration.to_string())),
            None => (cleaned.to_string(), None),
        };

        let compile = |raw: &str| {
            Pattern::parse(raw).map_err(|source| RuleParseError::InvalidPattern {
                line: cleaned.to_string(),
                source,
            })
        };

        let file_pattern = compile(&file_raw)?;
        let declaration_pattern = declaration_raw.as_deref().map(compile).transpose()?;

        Ok(Some(Self {
            raw_line: cleaned.to_string(),
            file_raw,
            declaration_raw,
            file_pattern,
            declaration_pattern,
        }))
    }

    /// Whether this rule suppresses whole files rather than declarations
    pub fn is_file_only(&self) -> bool {
        self.declaration_pattern.is_none()
    }

    pub fn matches_path(&self, path: &str) -> bool {
        self.file_pattern.is_match(path)
    }

    /// False when the rule has no declaration pattern
    pub fn matches_name(&self, name: &str) -> bool {
        self.declaration_pattern
            .as_ref()
            .map(|pattern| pattern.is_match(name))
            .unwrap_or(false)
    }
}

impl PartialEq for IgnoreRule {
    fn eq(&self, other: &Self) -> bool {
        self.file_raw == other.file_raw && self.declaration_raw == other.declaration_raw
    }
}

impl Eq for IgnoreRule {}

/// The compiled ignore specification for one run
#[derive(Debug, Default)]
pub struct IgnoreList {
    rules: Vec<IgnoreRule>,
}

impl IgnoreList {
    /// Compile the ignore-file text. Unusable lines are dropped with a
    /// diagnostic; the remaining rules still apply.
    pub fn parse(text: &str) -> Self {
        let rules = text
            .lines()
            .filter_map(|line| match IgnoreRule::parse(line) {
                Ok(rule) => rule,
                Err(error) => {
                    warn!("{error}");
                    None
                }
            })
            .collect();
        Self { rules }
    }

    /// Load the ignore file at `path`. A missing file is an empty list.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let list = Self::parse(&text);
                debug!("Loaded {} ignore rules from {}", list.len(), path.display());
                list
            }
            Err(_) => {
                debug!("No ignore file at {}", path.display());
                Self::default()
            }
        }
    }

    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First file-only rule matching `path`, if any
    pub fn file_match(&self, path: &str) -> Option<usize> {
        self.rules
            .iter()
            .position(|rule| rule.is_file_only() && rule.matches_path(path))
    }

    /// First rule with a declaration pattern matching both `path` and `name`
    pub fn declaration_match(&self, path: &str, name: &str) -> Option<usize> {
        self.rules
            .iter()
            .position(|rule| rule.matches_path(path) && rule.matches_name(name))
    }
}

/// Which rules fired during a run, merged from per-file match results
#[derive(Debug, Clone)]
pub struct RuleUsage {
    fired: Vec<bool>,
}

impl RuleUsage {
    pub fn new(list: &IgnoreList) -> Self {
        Self {
            fired: vec![false; list.len()],
        }
    }

    pub fn mark(&mut self, index: usize) {
        if let Some(flag) = self.fired.get_mut(index) {
            *flag = true;
        }
    }

    pub fn merge_indices(&mut self, indices: &[usize]) {
        for &index in indices {
            self.mark(index);
        }
    }

    pub fn has_fired(&self, index: usize) -> bool {
        self.fired.get(index).copied().unwrap_or(false)
    }

    /// Rules that never suppressed anything — surfaced as a hygiene warning
    pub fn stale<'a>(&self, list: &'a IgnoreList) -> Vec<&'a IgnoreRule> {
        list.rules()
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.has_fired(*index))
            .map(|(_, rule)| rule)
            .collect()
    }
}
