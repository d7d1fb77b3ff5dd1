//! Markup Parser Port - Topic markup extraction interface.
//!
//! This port defines the contract for turning one `markup.bcf` document
//! into a [`MarkupDocument`]. The reconciler depends on this trait, while
//! adapters (like `QuickXmlMarkupParser`) provide the implementation.

use crate::domain::bcf::{MarkupDocument, MarkupError};

/// Port for parsing topic markup.
///
/// # Contract
///
/// Implementations must:
/// - Fail only when the bytes are not well-formed XML
/// - Not validate against the BCF schema
/// - Default every absent element or attribute to an empty string
/// - Keep viewpoints and comments in document order
pub trait MarkupParser: Send + Sync {
    /// Parses markup bytes.
    ///
    /// # Errors
    ///
    /// Returns `MarkupError::Malformed` if the bytes are not well-formed.
    fn parse(&self, xml: &[u8]) -> Result<MarkupDocument, MarkupError>;
}
