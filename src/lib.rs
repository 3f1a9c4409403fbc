pub mod args;
pub mod config;
pub mod error;
pub mod imagefx;
pub mod logger;
pub mod models;
pub mod persist;

use std::path::Path;

pub use args::Options;
pub use config::ImageFxConfig;
pub use error::{ImageFxError, Result};
pub use imagefx::{GenerateStrategy, GenerationBackend, ImageFxApi, ImageFxClient};
pub use models::{GeneratedImage, GenerationRequest, ImageData, ResultRecord};

pub const DEFAULT_OUTPUT_PATH: &str = "./output/generated.png";

/// The whole run: validate, invoke, persist, report.
///
/// Required flags are checked before any client is constructed. Every
/// failure surfaces as a typed error; the process boundary in `main` owns
/// the exit code and the `===RESULT===` line.
pub async fn run(options: &Options) -> Result<ResultRecord> {
    let cookie = options.require("cookie")?;
    options.require("prompt")?;

    let client = ImageFxClient::new(ImageFxConfig::new(cookie))?;
    run_with_client(options, &client).await
}

/// Invoke and persist against an already-constructed client.
pub async fn run_with_client(options: &Options, client: &ImageFxClient) -> Result<ResultRecord> {
    let prompt = options.require("prompt")?;
    let output_path = options.get("outputPath").unwrap_or(DEFAULT_OUTPUT_PATH);
    let request = GenerationRequest::from_options(options);

    log::info!("Output path: {}", output_path);
    log::debug!("Request: {:?}", request);

    let images = client.generate(prompt, &request).await?;

    log::info!("Received {} image(s)", images.len());

    let saved = persist::save_first(&images, Path::new(output_path))?;
    Ok(ResultRecord::success(&saved, images.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_without_cookie_fails_before_client_construction() {
        let mut options = Options::default();
        options.insert("prompt", "a cat");

        let err = run(&options).await.unwrap_err();
        assert!(matches!(err, ImageFxError::MissingArgument(_)));
        assert!(err.to_string().contains("--cookie"));
    }

    #[tokio::test]
    async fn test_run_without_prompt_fails() {
        let mut options = Options::default();
        options.insert("cookie", "SID=abc");

        let err = run(&options).await.unwrap_err();
        assert!(err.to_string().contains("--prompt"));
    }

    #[tokio::test]
    async fn test_run_with_client_reports_success_record() {
        use async_trait::async_trait;
        use std::sync::Arc;

        struct OneBase64Image;

        #[async_trait]
        impl GenerationBackend for OneBase64Image {
            fn has_generate_image(&self) -> bool {
                true
            }

            async fn generate_image(
                &self,
                _prompt: &str,
                _request: &GenerationRequest,
            ) -> Result<Vec<GeneratedImage>> {
                Ok(vec![GeneratedImage::new(ImageData::Base64Encoded(
                    base64::encode(b"png bytes"),
                ))])
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("generated.png");

        let mut options = Options::default();
        options.insert("prompt", "a red circle");
        options.insert("outputPath", output.to_str().unwrap());

        let client = ImageFxClient::with_backend(Arc::new(OneBase64Image));
        let record = run_with_client(&options, &client).await.unwrap();

        assert!(record.success);
        assert_eq!(record.count, Some(1));
        assert_eq!(record.path.as_deref(), output.to_str());
        assert!(record.error.is_none());
        assert_eq!(std::fs::read(&output).unwrap(), b"png bytes");
    }
}
