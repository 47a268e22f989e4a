use crate::declaration::Declaration;
use crate::ignore::IgnoreRule;
use colored::Colorize;
use miette::Result;
use std::collections::BTreeMap;

/// Terminal reporter with colored output, grouped by file
pub struct TerminalReporter {
    /// Show declaration kinds in output
    show_kind: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self { show_kind: true }
    }

    #[allow(dead_code)] // Builder pattern method for future use
    pub fn with_kind(mut self, show: bool) -> Self {
        self.show_kind = show;
        self
    }

    pub fn report(&self, unused: &[Declaration], stale_rules: &[&IgnoreRule]) -> Result<()> {
        if unused.is_empty() {
            println!("{}", "No unused declarations found!".green().bold());
        } else {
            // Group by file; BTreeMap keeps files in path order.
            let mut by_file: BTreeMap<&str, Vec<&Declaration>> = BTreeMap::new();
            for declaration in unused {
                by_file
                    .entry(declaration.file.as_str())
                    .or_default()
                    .push(declaration);
            }

            println!();
            println!(
                "{}",
                format!("Found {} unused declarations:", unused.len())
                    .yellow()
                    .bold()
            );
            println!();

            for (file, mut items) in by_file {
                items.sort();

                println!("{}", file.cyan().bold());
                for item in items {
                    self.print_item(item);
                }
                println!();
            }

            println!(
                "{}",
                "If a finding is intentional, add it to your ignore file \
                 (FILE_PATTERN or FILE_PATTERN: DECLARATION_PATTERN)."
                    .dimmed()
            );
        }

        self.print_stale_rules(stale_rules);

        Ok(())
    }

    fn print_item(&self, item: &Declaration) {
        let location = format!("{}:", item.line);
        if self.show_kind {
            println!(
                "  {:>5} {} {}",
                location.dimmed(),
                item.kind.display_name().blue(),
                item.name.bold()
            );
        } else {
            println!("  {:>5} {}", location.dimmed(), item.name.bold());
        }
    }

    fn print_stale_rules(&self, stale_rules: &[&IgnoreRule]) {
        if stale_rules.is_empty() {
            return;
        }

        println!();
        println!(
            "{}",
            format!("{} ignore rules matched nothing:", stale_rules.len()).yellow()
        );
        for rule in stale_rules {
            println!("  {}", rule.raw_line.dimmed());
        }
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
