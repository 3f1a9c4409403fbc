use async_trait::async_trait;

use crate::{
    error::{ImageFxError, Result},
    models::{GeneratedImage, GenerationRequest},
};

/// A generation backend may expose either of two operations: the current
/// `generate_image` entry point or the older `generate` one. Backends
/// advertise what they support; the client resolves a strategy once at
/// construction instead of probing on every call.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    fn has_generate_image(&self) -> bool {
        false
    }

    fn has_generate(&self) -> bool {
        false
    }

    /// Names of the operations this backend exposes, for diagnostics.
    fn operations(&self) -> Vec<&'static str> {
        let mut operations = Vec::new();
        if self.has_generate_image() {
            operations.push("generate_image");
        }
        if self.has_generate() {
            operations.push("generate");
        }
        operations
    }

    async fn generate_image(
        &self,
        prompt: &str,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedImage>> {
        let _ = (prompt, request);
        Err(ImageFxError::UnsupportedClient(
            "generate_image is not implemented by this backend".into(),
        ))
    }

    async fn generate(
        &self,
        prompt: &str,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedImage>> {
        let _ = (prompt, request);
        Err(ImageFxError::UnsupportedClient(
            "generate is not implemented by this backend".into(),
        ))
    }
}

/// Invocation strategy resolved once from the backend's capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateStrategy {
    PrimaryMethod,
    FallbackMethod,
    Unsupported,
}

impl GenerateStrategy {
    /// The primary method wins when both are present.
    pub fn resolve(backend: &dyn GenerationBackend) -> Self {
        if backend.has_generate_image() {
            GenerateStrategy::PrimaryMethod
        } else if backend.has_generate() {
            GenerateStrategy::FallbackMethod
        } else {
            GenerateStrategy::Unsupported
        }
    }
}
