//! End-to-end pipeline tests: extraction + usage counting + classification,
//! run against in-memory sources.

use swiftsweep::analysis::UsageAnalyzer;
use swiftsweep::declaration::{Declaration, DeclarationKind};
use swiftsweep::discovery::{FileType, SourceFile};
use swiftsweep::ignore::{IgnoreList, RuleUsage};
use swiftsweep::parser::SwiftParser;

fn swift(path: &str, contents: &str) -> SourceFile {
    SourceFile::with_contents(path, FileType::Swift, contents)
}

fn xib(path: &str, contents: &str) -> SourceFile {
    SourceFile::with_contents(path, FileType::Xib, contents)
}

/// Run the whole pipeline and return (unused declarations sorted, rule usage)
fn analyze(
    sources: &[SourceFile],
    interfaces: &[SourceFile],
    ignore: &IgnoreList,
) -> (Vec<Declaration>, RuleUsage) {
    let parser = SwiftParser::new();
    let mut rule_usage = RuleUsage::new(ignore);
    let mut declarations = Vec::new();

    for file in sources {
        let extraction = parser.extract(&file.read_contents().unwrap(), &file.path_str(), ignore);
        rule_usage.merge_indices(&extraction.fired_rules);
        declarations.extend(extraction.declarations);
    }

    let mut unused =
        UsageAnalyzer::new().find_unused(&declarations, sources, interfaces);
    unused.sort();
    (unused, rule_usage)
}

fn names(declarations: &[Declaration]) -> Vec<&str> {
    declarations.iter().map(|d| d.name.as_str()).collect()
}

// ============================================================================
// Reference-counting scenarios
// ============================================================================

const LIVE_FILE: &str = "protocol Bat {}

class Foo {
    var bar = 0

    init() {
        print(bar)
        baz()
    }

    func baz() {}
}

extension Foo: Bat {}
";

#[test]
fn test_fully_referenced_file_has_no_unused_declarations() {
    let sources = vec![swift("foo.swift", LIVE_FILE)];
    let (unused, _) = analyze(&sources, &[], &IgnoreList::default());
    assert!(unused.is_empty(), "unexpected unused: {:?}", names(&unused));
}

#[test]
fn test_deleting_the_initializer_body_orphans_its_references() {
    let gutted = "protocol Bat {}

class Foo {
    var bar = 0

    init() {
    }

    func baz() {}
}

extension Foo: Bat {}
";
    let sources = vec![swift("foo.swift", gutted)];
    let (unused, _) = analyze(&sources, &[], &IgnoreList::default());
    assert_eq!(names(&unused), vec!["bar", "baz"]);
}

#[test]
fn test_references_across_files_count() {
    let sources = vec![
        swift("a.swift", "struct Point {\n    var x = 0\n}\n"),
        swift("b.swift", "let origin = Point()\nprint(origin, origin)\n"),
    ];
    let (unused, _) = analyze(&sources, &[], &IgnoreList::default());
    // Point is used from b.swift; x is only its own declaration.
    assert_eq!(names(&unused), vec!["x"]);
}

#[test]
fn test_unused_set_is_reported_in_total_order() {
    let sources = vec![
        swift("b.swift", "func zeta() {}\nfunc alpha() {}\n"),
        swift("a.swift", "func omega() {}\n"),
    ];
    let (unused, _) = analyze(&sources, &[], &IgnoreList::default());
    let locations: Vec<(String, usize)> = unused
        .iter()
        .map(|d| (d.file.clone(), d.line))
        .collect();
    assert_eq!(
        locations,
        vec![
            ("a.swift".to_string(), 1),
            ("b.swift".to_string(), 1),
            ("b.swift".to_string(), 2),
        ]
    );
}

#[test]
fn test_declaration_kinds_are_classified() {
    let sources = vec![swift(
        "kinds.swift",
        "func f() {}\nlet c = 0\nvar v = 0\nclass C {}\nenum E {}\nstruct S {}\nprotocol P {}\n",
    )];
    let (unused, _) = analyze(&sources, &[], &IgnoreList::default());
    let kinds: Vec<DeclarationKind> = unused.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DeclarationKind::Function,
            DeclarationKind::Constant,
            DeclarationKind::Variable,
            DeclarationKind::Class,
            DeclarationKind::Enum,
            DeclarationKind::Struct,
            DeclarationKind::Protocol,
        ]
    );
}

// ============================================================================
// Interface-file scenarios
// ============================================================================

#[test]
fn test_private_outlet_bound_in_interface_file_is_used() {
    let sources = vec![swift(
        "LoginView.swift",
        "class LoginView {\n    @IBOutlet private var bar: UIButton!\n    func show() {}\n}\n",
    )];
    let interfaces = vec![xib(
        "LoginView.xib",
        "<document>\n    <outlet property=\"bar\" destination=\"x\"/>\n</document>\n",
    )];
    let (unused, _) = analyze(&sources, &interfaces, &IgnoreList::default());
    assert!(!names(&unused).contains(&"bar"));
}

#[test]
fn test_interface_class_reference_keeps_class_alive() {
    let sources = vec![swift("View.swift", "class BannerView {}\n")];
    let interfaces = vec![xib("Main.xib", "<view customClass=\"BannerView\"/>\n")];

    let (unused, _) = analyze(&sources, &interfaces, &IgnoreList::default());
    assert!(unused.is_empty());

    let (without_interfaces, _) = analyze(&sources, &[], &IgnoreList::default());
    assert_eq!(names(&without_interfaces), vec!["BannerView"]);
}

#[test]
fn test_storyboard_selector_keeps_action_alive() {
    let sources = vec![swift(
        "Controller.swift",
        "class Controller {\n    @IBAction func didTap() {}\n}\n",
    )];
    let interfaces = vec![SourceFile::with_contents(
        "Main.storyboard",
        FileType::Storyboard,
        "<scene>\n    <action selector=\"didTap:\"/>\n</scene>\n",
    )];
    let (unused, _) = analyze(&sources, &interfaces, &IgnoreList::default());
    assert!(!names(&unused).contains(&"didTap"));
}

// ============================================================================
// Ignore-rule interplay
// ============================================================================

#[test]
fn test_ignored_file_still_counts_as_a_reference_source() {
    // a.swift is suppressed as a declaration source but its text still
    // keeps shared (declared in b.swift) alive.
    let ignore = IgnoreList::parse("\"a.swift\"\n");
    let sources = vec![
        swift("a.swift", "print(shared)\nfunc localOnly() {}\n"),
        swift("b.swift", "var shared = 1\n"),
    ];
    let (unused, rule_usage) = analyze(&sources, &[], &ignore);

    assert!(unused.is_empty(), "unexpected unused: {:?}", names(&unused));
    assert!(rule_usage.has_fired(0));
    assert!(rule_usage.stale(&ignore).is_empty());
}

#[test]
fn test_stale_rules_are_surfaced() {
    let ignore = IgnoreList::parse("\"a.swift\"\n\"never-matches.swift\": doesNotExist\n");
    let sources = vec![swift("a.swift", "func f() {}\n"), swift("b.swift", "f()\n")];
    let (_, rule_usage) = analyze(&sources, &[], &ignore);

    let stale = rule_usage.stale(&ignore);
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].raw_line, "\"never-matches.swift\": doesNotExist");
}

#[test]
fn test_declaration_rule_suppresses_reporting_only_for_matching_names() {
    let ignore = IgnoreList::parse(".*.swift: deprecated.*\n");
    let sources = vec![swift(
        "old.swift",
        "func deprecatedThing() {}\nfunc freshThing() {}\n",
    )];
    let (unused, rule_usage) = analyze(&sources, &[], &ignore);

    assert_eq!(names(&unused), vec!["freshThing"]);
    assert!(rule_usage.has_fired(0));
}
