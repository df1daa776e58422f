//! Document analyzer trait

use async_trait::async_trait;
use std::sync::Arc;

use crate::{AnalysisResult, Result};

/// Trait for services that turn raw document text into an [`AnalysisResult`].
///
/// Implementations issue exactly one request per call, never retry, and
/// surface every failure as one of the crate's [`crate::Error`] kinds.
/// Blank input is the caller's concern; it is forwarded as-is.
#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    /// Analyze the given document text
    async fn analyze(&self, document_text: &str) -> Result<AnalysisResult>;

    /// Get the model ID being used
    fn model_id(&self) -> &str;
}

#[async_trait]
impl<T: DocumentAnalyzer + ?Sized> DocumentAnalyzer for Arc<T> {
    async fn analyze(&self, document_text: &str) -> Result<AnalysisResult> {
        (**self).analyze(document_text).await
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}
