use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::{
    config::ImageFxConfig,
    error::{ImageFxError, Result},
    imagefx::backend::GenerationBackend,
    models::{GeneratedImage, GenerationRequest, ImageData},
};

pub const DEFAULT_SESSION_URL: &str = "https://labs.google/fx/api/auth/session";
pub const DEFAULT_API_URL: &str = "https://aisandbox-pa.googleapis.com/v1:runImageFx";

/// HTTP backend for the ImageFX API.
///
/// The cookie is exchanged for a short-lived bearer token at the labs.google
/// session endpoint, then the prompt and request options are posted to the
/// `runImageFx` endpoint.
pub struct ImageFxApi {
    client: Client,
    cookie: String,
    session_url: String,
    api_url: String,
}

impl ImageFxApi {
    pub fn new(config: ImageFxConfig) -> Self {
        ImageFxApi {
            client: Client::new(),
            cookie: config.cookie.trim().to_string(),
            session_url: config
                .session_url
                .unwrap_or_else(|| DEFAULT_SESSION_URL.to_string()),
            api_url: config.api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        }
    }

    async fn fetch_access_token(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.session_url)
            .header(reqwest::header::COOKIE, self.cookie.as_str())
            .send()
            .await
            .map_err(|e| ImageFxError::RequestError(format!("session request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImageFxError::AuthError(format!(
                "session request returned {}: {}",
                status, body
            )));
        }

        let session: Value = response.json().await.map_err(|e| {
            ImageFxError::AuthError(format!("failed to parse session response: {}", e))
        })?;

        session
            .get("access_token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                ImageFxError::AuthError(
                    "session response carried no access token; the cookie may be expired".into(),
                )
            })
    }

    fn build_payload(&self, prompt: &str, request: &GenerationRequest) -> Value {
        let mut user_input = json!({
            "candidatesCount": request.count,
            "prompts": [prompt],
        });
        if let Some(seed) = request.seed {
            user_input["seed"] = json!(seed);
        }

        let mut payload = json!({
            "userInput": user_input,
            "clientContext": {
                "sessionId": format!(";{}", chrono::Utc::now().timestamp_millis()),
                "tool": "IMAGE_FX"
            },
        });
        if let Some(model) = &request.model {
            payload["modelInput"] = json!({ "modelNameType": model });
        }
        if let Some(size) = &request.size {
            payload["aspectRatio"] = json!(format!("IMAGE_ASPECT_RATIO_{}", size));
        }
        payload
    }
}

#[async_trait]
impl GenerationBackend for ImageFxApi {
    fn has_generate_image(&self) -> bool {
        true
    }

    async fn generate_image(
        &self,
        prompt: &str,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedImage>> {
        let token = self.fetch_access_token().await?;

        log::info!("Generating {} image(s)", request.count);

        let response = self
            .client
            .post(&self.api_url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", token),
            )
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(&self.build_payload(prompt, request))
            .send()
            .await
            .map_err(|e| {
                ImageFxError::RequestError(format!("generation request failed: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ImageFxError::ResponseError(format!("failed to read generation response: {}", e))
        })?;

        if !status.is_success() {
            return Err(ImageFxError::ResponseError(format!(
                "generation request returned {}: {}",
                status, body
            )));
        }

        let value: Value = serde_json::from_str(&body).map_err(|e| {
            ImageFxError::ResponseError(format!("failed to parse generation response: {}", e))
        })?;

        Ok(parse_images(&value, prompt))
    }
}

fn parse_images(response: &Value, prompt: &str) -> Vec<GeneratedImage> {
    let mut images = Vec::new();

    let panels = response
        .get("imagePanels")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for panel in panels {
        let generated = panel
            .get("generatedImages")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for item in generated {
            images.push(GeneratedImage {
                data: ImageData::from_value(item),
                media_id: item
                    .get("mediaGenerationId")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                prompt: Some(prompt.to_string()),
            });
        }
    }

    images
}
