use crate::declaration::Declaration;
use crate::ignore::IgnoreRule;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, unused: &[Declaration], stale_rules: &[&IgnoreRule]) -> Result<()> {
        let report = JsonReport::build(unused, stale_rules);
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{json}");
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct JsonReport {
    version: &'static str,
    total_unused: usize,
    unused: Vec<JsonDeclaration>,
    stale_rules: Vec<String>,
}

#[derive(Serialize)]
struct JsonDeclaration {
    file: String,
    line: usize,
    kind: &'static str,
    name: String,
    modifiers: Vec<String>,
}

impl JsonReport {
    fn build(unused: &[Declaration], stale_rules: &[&IgnoreRule]) -> Self {
        let mut sorted: Vec<&Declaration> = unused.iter().collect();
        sorted.sort();

        Self {
            version: env!("CARGO_PKG_VERSION"),
            total_unused: unused.len(),
            unused: sorted
                .into_iter()
                .map(|declaration| JsonDeclaration {
                    file: declaration.file.clone(),
                    line: declaration.line,
                    kind: declaration.kind.display_name(),
                    name: declaration.name.clone(),
                    modifiers: declaration.modifiers.raw.clone(),
                })
                .collect(),
            stale_rules: stale_rules.iter().map(|rule| rule.raw_line.clone()).collect(),
        }
    }
}
