mod interface;
mod sanitizer;
mod swift;

pub use interface::{InterfaceReferences, InterfaceScanner};
pub use sanitizer::Sanitizer;
pub use swift::{FileExtraction, SwiftParser};
