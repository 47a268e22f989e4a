use serde::Serialize;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Kind of declaration, mapped from the introducing Swift keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeclarationKind {
    Function,
    /// `let` binding
    Constant,
    /// `var` binding
    Variable,
    Class,
    Enum,
    Struct,
    Protocol,
}

impl DeclarationKind {
    /// Map a declaration keyword to its kind
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "func" => Some(DeclarationKind::Function),
            "let" => Some(DeclarationKind::Constant),
            "var" => Some(DeclarationKind::Variable),
            "class" => Some(DeclarationKind::Class),
            "enum" => Some(DeclarationKind::Enum),
            "struct" => Some(DeclarationKind::Struct),
            "protocol" => Some(DeclarationKind::Protocol),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            DeclarationKind::Function => "func",
            DeclarationKind::Constant => "let",
            DeclarationKind::Variable => "var",
            DeclarationKind::Class => "class",
            DeclarationKind::Enum => "enum",
            DeclarationKind::Struct => "struct",
            DeclarationKind::Protocol => "protocol",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DeclarationKind::Function => "function",
            DeclarationKind::Constant => "constant",
            DeclarationKind::Variable => "variable",
            DeclarationKind::Class => "class",
            DeclarationKind::Enum => "enum",
            DeclarationKind::Struct => "struct",
            DeclarationKind::Protocol => "protocol",
        }
    }

    pub fn is_type(&self) -> bool {
        matches!(
            self,
            DeclarationKind::Class
                | DeclarationKind::Enum
                | DeclarationKind::Struct
                | DeclarationKind::Protocol
        )
    }
}

/// Modifier flags derived from the tokens preceding the declaration keyword,
/// computed once at construction
#[derive(Debug, Clone, Default, Serialize)]
pub struct Modifiers {
    /// `override` — exempt from usage checks
    pub is_override: bool,

    /// `@IBOutlet` / `@IBAction` — exposed to interface files
    pub is_interface_linked: bool,

    /// `private` / `fileprivate` — references only count within the defining file
    pub is_restricted: bool,

    /// The raw modifier tokens, in source order
    pub raw: Vec<String>,
}

impl Modifiers {
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        let is_override = tokens.iter().any(|t| t == "override");
        let is_interface_linked = tokens.iter().any(|t| t == "@IBOutlet" || t == "@IBAction");
        let is_restricted = tokens.iter().any(|t| t == "private" || t == "fileprivate");
        Self {
            is_override,
            is_interface_linked,
            is_restricted,
            raw: tokens,
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.raw.iter().any(|t| t == token)
    }
}

/// A declaration site found in a Swift file
///
/// Identity is (file, line, kind, name); modifiers and the raw line are
/// carried for diagnostics only. Instances are immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct Declaration {
    /// Path of the defining file
    pub file: String,

    /// Original line text, unsanitized
    pub raw_line: String,

    /// Line number (1-indexed)
    pub line: usize,

    /// Kind of declaration
    pub kind: DeclarationKind,

    /// Identifier following the kind keyword
    pub name: String,

    /// Modifier flags and raw tokens
    pub modifiers: Modifiers,
}

impl Declaration {
    pub fn new(
        file: impl Into<String>,
        raw_line: impl Into<String>,
        line: usize,
        kind: DeclarationKind,
        name: impl Into<String>,
        modifier_tokens: Vec<String>,
    ) -> Self {
        Self {
            file: file.into(),
            raw_line: raw_line.into(),
            line,
            kind,
            name: name.into(),
            modifiers: Modifiers::from_tokens(modifier_tokens),
        }
    }

    /// Display string for diagnostics, e.g. `a.swift:12: function foo`
    pub fn display(&self) -> String {
        format!(
            "{}:{}: {} {}",
            self.file,
            self.line,
            self.kind.display_name(),
            self.name
        )
    }
}

impl PartialEq for Declaration {
    fn eq(&self, other: &Self) -> bool {
        self.file == other.file
            && self.line == other.line
            && self.kind == other.kind
            && self.name == other.name
    }
}

impl Eq for Declaration {}

impl Hash for Declaration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.file.hash(state);
        self.line.hash(state);
        self.kind.hash(state);
        self.name.hash(state);
    }
}

impl Ord for Declaration {
    fn cmp(&self, other: &Self) -> Ordering {
        self.file
            .cmp(&other.file)
            .then_with(|| self.line.cmp(&other.line))
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for Declaration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
