//! Integration tests for the ignore-specification engine: grammar, pattern
//! semantics, and bookkeeping across an extraction pass.

use swiftsweep::ignore::{IgnoreList, IgnoreRule, Pattern, RuleUsage};
use swiftsweep::parser::SwiftParser;

const IGNORE_FILE: &str = r#"# An example ignore file.

# Whole files:
"Generated/Models.swift"
.*Tests\.swift

# Specific declarations:
"Sources/App.swift": "AppDelegate"
Sources/.*: legacy.*   # transition period
"#;

#[test]
fn test_ignore_file_grammar() {
    let list = IgnoreList::parse(IGNORE_FILE);
    assert_eq!(list.len(), 4);

    let rules = list.rules();
    assert!(rules[0].is_file_only());
    assert!(rules[1].is_file_only());
    assert!(!rules[2].is_file_only());
    assert!(!rules[3].is_file_only());
}

#[test]
fn test_match_anywhere_semantics() {
    let list = IgnoreList::parse(IGNORE_FILE);
    let rules = list.rules();

    // Quoted literal: substring containment, metacharacters inert.
    assert!(rules[0].matches_path("ios/Generated/Models.swift"));
    assert!(!rules[0].matches_path("ios/Generated/Models2x.swift"));

    // Regex: unanchored is_match.
    assert!(rules[1].matches_path("Sources/LoginTests.swift"));
    assert!(!rules[1].matches_path("Sources/Login.swift"));

    // Declaration side follows the same semantics.
    assert!(rules[3].matches_name("legacyParser"));
    assert!(!rules[3].matches_name("parser"));
}

#[test]
fn test_anchoring_opts_into_full_span_matching() {
    let rule = IgnoreRule::parse("^exact\\.swift$").unwrap().unwrap();
    assert!(rule.matches_path("exact.swift"));
    assert!(!rule.matches_path("inexact.swift"));
}

#[test]
fn test_pattern_union() {
    assert!(matches!(Pattern::parse("\"quoted\"").unwrap(), Pattern::Literal(_)));
    assert!(matches!(Pattern::parse("unquoted.*").unwrap(), Pattern::Regex(_)));
    assert!(Pattern::parse("[unclosed").is_err());
}

#[test]
fn test_invalid_lines_are_dropped_not_fatal() {
    let list = IgnoreList::parse("[bad regex\n\"good.swift\"\n");
    assert_eq!(list.len(), 1);
    assert!(list.rules()[0].matches_path("good.swift"));
}

#[test]
fn test_rule_bookkeeping_over_an_extraction_pass() {
    let list = IgnoreList::parse("\"a.swift\"\n\"a.swift\": unusedHelper\n\"b.swift\": b.*\n");
    let parser = SwiftParser::new();
    let mut usage = RuleUsage::new(&list);

    // a.swift is suppressed wholesale by rule 0; rule 1 never gets a chance.
    let a = parser.extract("func unusedHelper() {}\n", "a.swift", &list);
    usage.merge_indices(&a.fired_rules);
    assert!(a.declarations.is_empty());

    // b.swift loses its b-prefixed declaration to rule 2.
    let b = parser.extract("func bootstrap() {}\nfunc main() {}\n", "b.swift", &list);
    usage.merge_indices(&b.fired_rules);
    let names: Vec<_> = b.declarations.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["main"]);

    assert!(usage.has_fired(0));
    assert!(!usage.has_fired(1));
    assert!(usage.has_fired(2));

    let stale: Vec<_> = usage.stale(&list).iter().map(|r| r.raw_line.clone()).collect();
    assert_eq!(stale, vec!["\"a.swift\": unusedHelper"]);
}

#[test]
fn test_first_matching_rule_wins() {
    // Both rules match; only the first is credited.
    let list = IgnoreList::parse(".*.swift: helper\n.*.swift: help.*\n");
    let parser = SwiftParser::new();

    let extraction = parser.extract("func helper() {}\n", "x.swift", &list);
    assert!(extraction.declarations.is_empty());
    assert_eq!(extraction.fired_rules, vec![0]);
}
