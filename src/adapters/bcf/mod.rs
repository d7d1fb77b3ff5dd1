//! BCF container adapters.
//!
//! - `QuickXmlMarkupParser` - `MarkupParser` over quick-xml events
//! - `ZipArchiveReader` - `ArchiveReader` over a zip container

mod quick_xml_parser;
mod zip_archive;

pub use quick_xml_parser::QuickXmlMarkupParser;
pub use zip_archive::ZipArchiveReader;
