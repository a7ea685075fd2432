use async_trait::async_trait;

use super::AnnotationBackend;
use crate::core::error::Result;

/// Returns every chunk unchanged.
///
/// Useful for running the rule engine and indexer over documents that
/// already carry markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughBackend;

#[async_trait]
impl AnnotationBackend for PassthroughBackend {
    fn name(&self) -> &str {
        "passthrough"
    }

    async fn annotate(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }
}
