//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the import core to external systems:
//! - `bcf` - BCF zip container and quick-xml markup parser
//! - `memory` - In-memory collaborators for tests and dry runs

pub mod bcf;
pub mod memory;

pub use bcf::{QuickXmlMarkupParser, ZipArchiveReader};
