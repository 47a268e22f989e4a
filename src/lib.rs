//! swiftsweep - Fast unused-declaration detection for Swift projects
//!
//! This library finds dead code in Swift code bases using lexical analysis
//! only: no AST, no type checking, no scope resolution. A declaration is
//! considered used when its identifier appears anywhere else in the project
//! after comments and string-literal bodies are stripped, or when an
//! interface file (xib/storyboard/nib) binds it.
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **File Discovery** - Find all .swift and interface files
//! 2. **Extraction** - Sanitize each file and extract declaration sites,
//!    filtered through the ignore-rule engine
//! 3. **Usage Counting** - Count identifier occurrences across source files
//!    and interface-file bindings under visibility rules
//! 4. **Classification** - Report declarations whose only occurrence is
//!    their own declaration line
//! 5. **Reporting** - Output results in terminal or JSON format

pub mod analysis;
pub mod config;
pub mod declaration;
pub mod discovery;
pub mod ignore;
pub mod parser;
pub mod report;

pub use analysis::UsageAnalyzer;
pub use config::Config;
pub use declaration::{Declaration, DeclarationKind, Modifiers};
pub use discovery::{FileFinder, FileStats, FileType, SourceFile};
pub use ignore::{IgnoreList, IgnoreRule, Pattern, RuleUsage};
pub use parser::{FileExtraction, InterfaceScanner, Sanitizer, SwiftParser};
pub use report::{Reporter, ReportFormat};
