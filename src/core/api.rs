use crate::domain::model::{SdkArchive, SdkRequest};
use crate::domain::ports::SdkApi;
use crate::utils::error::{CliError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, CONTENT_DISPOSITION};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};

pub const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for the hosted generation endpoint
#[derive(Debug, Clone)]
pub struct SidekoClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl SidekoClient {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            base_url,
            api_key,
            client: Client::new(),
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/sdk/generate/", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SdkApi for SidekoClient {
    async fn generate(&self, request: &SdkRequest) -> Result<SdkArchive> {
        let url = self.generate_url();
        tracing::debug!("POST {url}");

        let form = Form::new()
            .text("extension", request.extension.clone())
            .text("language", request.language.as_str())
            .text("name", request.name.clone())
            .part(
                "file",
                Part::bytes(request.spec_content.clone()).file_name(request.spec_filename.clone()),
            );

        let mut req = self.client.post(&url).multipart(form);
        if let Some(key) = &self.api_key {
            req = req.header(API_KEY_HEADER, key);
        }

        let response = req.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {status}");

        if !status.is_success() {
            let message = extract_error_message(response).await;
            return Err(CliError::ApiStatusError {
                status: status.as_u16(),
                message,
            });
        }

        let filename = extract_filename(response.headers());
        let content = response.bytes().await?.to_vec();
        tracing::debug!(
            "Received archive: {} bytes ({})",
            content.len(),
            filename.as_deref().unwrap_or("no filename")
        );

        Ok(SdkArchive { content, filename })
    }
}

/// Pulls a human-readable message out of an error response body; the API
/// usually sends `{"message": "..."}` but this cannot be relied on
async fn extract_error_message(response: Response) -> String {
    let status = response.status();
    let fallback = status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string();

    match response.text().await {
        Ok(body) if !body.trim().is_empty() => serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message")?.as_str().map(String::from))
            .unwrap_or(body),
        _ => fallback,
    }
}

/// Archive filename from a `Content-Disposition: attachment; filename="..."`
/// header, if the API sent one
pub fn extract_filename(headers: &HeaderMap) -> Option<String> {
    let disposition = headers.get(CONTENT_DISPOSITION)?.to_str().ok()?;
    let filename_part = disposition
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))?;
    let filename = filename_part.trim_matches('"');
    if filename.is_empty() {
        None
    } else {
        Some(filename.to_string())
    }
}
