pub mod api;
pub mod backend;

use std::sync::Arc;

use crate::{
    config::ImageFxConfig,
    error::{ImageFxError, Result},
    models::{GeneratedImage, GenerationRequest},
};

pub use api::ImageFxApi;
pub use backend::{GenerateStrategy, GenerationBackend};

/// Client over a [`GenerationBackend`]. The invocation strategy is resolved
/// once here, so a generate call dispatches directly instead of probing.
pub struct ImageFxClient {
    backend: Arc<dyn GenerationBackend>,
    strategy: GenerateStrategy,
}

impl ImageFxClient {
    pub fn new(config: ImageFxConfig) -> Result<Self> {
        if config.cookie.trim().is_empty() {
            return Err(ImageFxError::ConfigError("cookie must not be empty".into()));
        }
        Ok(Self::with_backend(Arc::new(ImageFxApi::new(config))))
    }

    pub fn with_backend(backend: Arc<dyn GenerationBackend>) -> Self {
        let strategy = GenerateStrategy::resolve(backend.as_ref());
        ImageFxClient { backend, strategy }
    }

    pub fn strategy(&self) -> GenerateStrategy {
        self.strategy
    }

    /// Run exactly one generation call against the resolved entry point.
    ///
    /// A call that resolves to an empty image list is an error even though
    /// the backend itself did not fail.
    pub async fn generate(
        &self,
        prompt: &str,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedImage>> {
        let images = match self.strategy {
            GenerateStrategy::PrimaryMethod => {
                log::debug!("Dispatching to generate_image");
                self.backend.generate_image(prompt, request).await?
            }
            GenerateStrategy::FallbackMethod => {
                log::debug!("Dispatching to fallback generate");
                self.backend.generate(prompt, request).await?
            }
            GenerateStrategy::Unsupported => {
                log::error!(
                    "Client exposes none of the expected generation methods; available operations: {:?}",
                    self.backend.operations()
                );
                return Err(ImageFxError::UnsupportedClient(
                    "client exposes neither generate_image nor generate".into(),
                ));
            }
        };

        if images.is_empty() {
            return Err(ImageFxError::ResponseError(
                "no images were returned by the generation call".into(),
            ));
        }

        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageData;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingBackend {
        primary: bool,
        fallback: bool,
        primary_calls: AtomicUsize,
        fallback_calls: AtomicUsize,
        images: usize,
    }

    #[async_trait]
    impl GenerationBackend for CountingBackend {
        fn has_generate_image(&self) -> bool {
            self.primary
        }

        fn has_generate(&self) -> bool {
            self.fallback
        }

        async fn generate_image(
            &self,
            _prompt: &str,
            _request: &GenerationRequest,
        ) -> Result<Vec<GeneratedImage>> {
            self.primary_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.results())
        }

        async fn generate(
            &self,
            _prompt: &str,
            _request: &GenerationRequest,
        ) -> Result<Vec<GeneratedImage>> {
            self.fallback_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.results())
        }
    }

    impl CountingBackend {
        fn results(&self) -> Vec<GeneratedImage> {
            (0..self.images)
                .map(|_| GeneratedImage::new(ImageData::Base64Encoded("aGk=".to_string())))
                .collect()
        }
    }

    #[tokio::test]
    async fn test_fallback_only_backend_uses_fallback() {
        let backend = Arc::new(CountingBackend {
            fallback: true,
            images: 1,
            ..Default::default()
        });
        let client = ImageFxClient::with_backend(backend.clone());
        assert_eq!(client.strategy(), GenerateStrategy::FallbackMethod);

        let images = client
            .generate("a cat", &GenerationRequest::default())
            .await
            .unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(backend.primary_calls.load(Ordering::SeqCst), 0);
        assert_eq!(backend.fallback_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_primary_wins_when_both_present() {
        let backend = Arc::new(CountingBackend {
            primary: true,
            fallback: true,
            images: 2,
            ..Default::default()
        });
        let client = ImageFxClient::with_backend(backend.clone());

        let images = client
            .generate("a cat", &GenerationRequest::default())
            .await
            .unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(backend.primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(backend.fallback_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_neither_method_is_unsupported() {
        let backend = Arc::new(CountingBackend::default());
        let client = ImageFxClient::with_backend(backend.clone());
        assert_eq!(client.strategy(), GenerateStrategy::Unsupported);

        let err = client
            .generate("a cat", &GenerationRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ImageFxError::UnsupportedClient(_)));
        assert_eq!(backend.primary_calls.load(Ordering::SeqCst), 0);
        assert_eq!(backend.fallback_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_result_is_an_error() {
        let backend = Arc::new(CountingBackend {
            primary: true,
            images: 0,
            ..Default::default()
        });
        let client = ImageFxClient::with_backend(backend);

        let err = client
            .generate("a cat", &GenerationRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ImageFxError::ResponseError(_)));
        assert!(err.to_string().contains("no images"));
    }

    #[test]
    fn test_empty_cookie_is_rejected() {
        let err = ImageFxClient::new(ImageFxConfig::new("   ")).err().unwrap();
        assert!(matches!(err, ImageFxError::ConfigError(_)));
    }
}
