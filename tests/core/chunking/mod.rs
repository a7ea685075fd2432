//! Chunking layer tests
//!
//! Paragraph preservation, token bounds and the single-chunk policy.
