use crate::declaration::Declaration;
use crate::discovery::SourceFile;
use crate::parser::{InterfaceScanner, Sanitizer};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Finds unused declarations by running a text-based reference count across
/// source and interface files.
///
/// A declaration's own line contributes one occurrence to its count, so
/// "unused" means a total of at most 1 — not 0. Override declarations are
/// exempt regardless of count.
pub struct UsageAnalyzer {
    sanitizer: Sanitizer,
    scanner: InterfaceScanner,
    parallel: bool,
}

impl UsageAnalyzer {
    pub fn new() -> Self {
        Self {
            sanitizer: Sanitizer::new(),
            scanner: InterfaceScanner::new(),
            parallel: false,
        }
    }

    /// Count source files in parallel. Per-file counts merge by element-wise
    /// addition, so the result does not depend on file order.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Return the subset of `declarations` whose total occurrence count is
    /// at most 1 and which are not overrides. The result is unordered;
    /// sorting is the caller's concern.
    pub fn find_unused(
        &self,
        declarations: &[Declaration],
        sources: &[SourceFile],
        interfaces: &[SourceFile],
    ) -> Vec<Declaration> {
        let totals = self.count_usages(declarations, sources, interfaces);

        for (declaration, count) in declarations.iter().zip(&totals) {
            debug!("{} used {count} time(s)", declaration.display());
        }

        declarations
            .iter()
            .zip(&totals)
            .filter(|(declaration, &count)| count <= 1 && !declaration.modifiers.is_override)
            .map(|(declaration, _)| declaration.clone())
            .collect()
    }

    /// Total occurrence count per declaration, aligned with the input slice
    pub fn count_usages(
        &self,
        declarations: &[Declaration],
        sources: &[SourceFile],
        interfaces: &[SourceFile],
    ) -> Vec<usize> {
        let mut totals = if self.parallel {
            sources
                .par_iter()
                .map(|file| self.count_in_source(declarations, file))
                .reduce(|| vec![0; declarations.len()], merge_counts)
        } else {
            sources.iter().fold(vec![0; declarations.len()], |acc, file| {
                merge_counts(acc, self.count_in_source(declarations, file))
            })
        };

        for file in interfaces {
            totals = merge_counts(totals, self.count_in_interface(declarations, file));
        }

        totals
    }

    /// One source file's contribution: the frequency of each declaration's
    /// name among the file's identifier tokens, after sanitizing.
    /// Restricted-visibility declarations only accumulate from their own file.
    fn count_in_source(&self, declarations: &[Declaration], file: &SourceFile) -> Vec<usize> {
        let mut counts = vec![0; declarations.len()];
        let contents = match file.read_contents() {
            Ok(contents) => contents,
            Err(error) => {
                warn!("Failed to read contents of file {}: {error}", file.path.display());
                return counts;
            }
        };
        let path = file.path_str();

        let sanitized = self.sanitizer.sanitize(&contents);
        let mut frequencies: HashMap<&str, usize> = HashMap::new();
        for token in sanitized.split(|c: char| !c.is_alphanumeric() && c != '_') {
            if !token.is_empty() {
                *frequencies.entry(token).or_insert(0) += 1;
            }
        }

        for (index, declaration) in declarations.iter().enumerate() {
            if declaration.modifiers.is_restricted && declaration.file != path {
                continue;
            }
            counts[index] += frequencies.get(declaration.name.as_str()).copied().unwrap_or(0);
        }

        counts
    }

    /// One interface file's contribution: one occurrence per attribute match.
    /// Class references only reach non-restricted declarations; selector and
    /// property references also reach restricted declarations that are
    /// explicitly interface-linked.
    fn count_in_interface(&self, declarations: &[Declaration], file: &SourceFile) -> Vec<usize> {
        let mut counts = vec![0; declarations.len()];
        let contents = match file.read_contents() {
            Ok(contents) => contents,
            Err(error) => {
                warn!("Failed to read contents of file {}: {error}", file.path.display());
                return counts;
            }
        };

        let references = self.scanner.scan(&contents);

        for name in &references.classes {
            for (index, declaration) in declarations.iter().enumerate() {
                if declaration.name == *name && !declaration.modifiers.is_restricted {
                    counts[index] += 1;
                }
            }
        }

        for name in references.selectors.iter().chain(&references.properties) {
            for (index, declaration) in declarations.iter().enumerate() {
                if declaration.name == *name
                    && (!declaration.modifiers.is_restricted
                        || declaration.modifiers.is_interface_linked)
                {
                    counts[index] += 1;
                }
            }
        }

        counts
    }
}

impl Default for UsageAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn merge_counts(mut totals: Vec<usize>, additions: Vec<usize>) -> Vec<usize> {
    for (total, addition) in totals.iter_mut().zip(additions) {
        *total += addition;
    }
    totals
}
