mod usage;

pub use usage::UsageAnalyzer;
