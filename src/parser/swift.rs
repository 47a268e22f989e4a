use crate::declaration::{Declaration, DeclarationKind};
use crate::ignore::IgnoreList;
use crate::parser::Sanitizer;
use regex::Regex;
use tracing::debug;

/// Result of extracting one file: the declarations kept, plus the indices of
/// ignore rules that suppressed something. The caller merges fired indices
/// across files into a [`crate::ignore::RuleUsage`].
#[derive(Debug, Default)]
pub struct FileExtraction {
    pub declarations: Vec<Declaration>,
    pub fired_rules: Vec<usize>,
}

/// Extracts declarations from Swift source using line-oriented pattern
/// matching. At most one declaration per line; the first match wins.
pub struct SwiftParser {
    declaration: Regex,
    sanitizer: Sanitizer,
}

impl SwiftParser {
    pub fn new() -> Self {
        Self {
            declaration: Regex::new(r"\b(func|let|var|class|enum|struct|protocol)\s+(\w+)")
                .unwrap(),
            sanitizer: Sanitizer::new(),
        }
    }

    /// Extract declarations from one file's content.
    ///
    /// A file-only ignore rule matching `path` suppresses extraction for the
    /// whole file; the file still serves as a reference source for counting.
    pub fn extract(&self, contents: &str, path: &str, ignore: &IgnoreList) -> FileExtraction {
        let mut fired_rules = Vec::new();

        if let Some(index) = ignore.file_match(path) {
            debug!(
                "Skipping {path} due to ignore rule: {}",
                ignore.rules()[index].raw_line
            );
            fired_rules.push(index);
            return FileExtraction {
                declarations: Vec::new(),
                fired_rules,
            };
        }

        let original_lines: Vec<&str> = contents.lines().collect();
        let cleaned = self.sanitizer.strip_block_comments(contents);

        let mut declarations = Vec::new();
        for (index, line) in cleaned.lines().enumerate() {
            let line = self.sanitizer.strip_line_comment(line);
            if line.trim().is_empty() {
                continue;
            }

            let Some(captures) = self.declaration.captures(line) else {
                continue;
            };
            let keyword = captures.get(1).unwrap();
            let Some(kind) = DeclarationKind::from_keyword(keyword.as_str()) else {
                continue;
            };
            let name = captures.get(2).unwrap().as_str();

            // Modifiers: whitespace-separated tokens before the keyword.
            let modifiers: Vec<String> = line[..keyword.start()]
                .split_whitespace()
                .map(str::to_string)
                .collect();

            let raw_line = original_lines.get(index).copied().unwrap_or(line);
            let declaration =
                Declaration::new(path, raw_line, index + 1, kind, name, modifiers);

            if let Some(rule_index) = ignore.declaration_match(path, &declaration.name) {
                debug!(
                    "Skipping declaration {name:?} at {path} due to ignore rule: {}",
                    ignore.rules()[rule_index].raw_line
                );
                fired_rules.push(rule_index);
                continue;
            }

            debug!("Found {} {name} in {path}", kind.display_name());
            declarations.push(declaration);
        }

        FileExtraction {
            declarations,
            fired_rules,
        }
    }
}

impl Default for SwiftParser {
    fn default() -> Self {
        Self::new()
    }
}
