mod loader;

pub use loader::{Config, InterfaceConfig, ReportConfig};
