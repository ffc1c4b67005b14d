use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use scout_logging::scout_info;

use crate::client::{RawResponse, EXTRACT_TEXT_PATH, GATHER_PATH};
use crate::wire::{
    ExtractTextRequestBody, ExtractTextResponseBody, GatherRequestBody, GatherResponseBody,
};
use crate::{ExtractedText, FailureKind, PageInfo, ReqwestClient, SubmitError};

const GATHER_FALLBACK_MESSAGE: &str = "Failed to gather information";
const EXTRACT_FALLBACK_MESSAGE: &str = "Failed to extract text from image";

impl ReqwestClient {
    /// Asks the server to fetch one page and summarize its title, text, links and images.
    pub async fn gather(&self, url: &str) -> Result<PageInfo, SubmitError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(SubmitError::new(FailureKind::Validation, "Please enter a URL"));
        }

        let raw = self.post_json(GATHER_PATH, &GatherRequestBody { url }).await?;
        let body: GatherResponseBody = decode_envelope(&raw)?;
        if !body.success {
            return Err(application_error(body.error, GATHER_FALLBACK_MESSAGE));
        }
        let info = body.into_page_info(url);
        scout_info!(
            "Gathered {} ({} links, {} images)",
            info.url,
            info.links.len(),
            info.images.len()
        );
        Ok(info)
    }

    /// Uploads an image as a data URL and returns the text the server read from it.
    pub async fn extract_text(&self, image: &[u8], mime: &str) -> Result<ExtractedText, SubmitError> {
        if image.is_empty() {
            return Err(SubmitError::new(
                FailureKind::Validation,
                "No image data provided",
            ));
        }

        let request = ExtractTextRequestBody {
            image: data_url(image, mime),
        };
        let raw = self.post_json(EXTRACT_TEXT_PATH, &request).await?;
        let body: ExtractTextResponseBody = decode_envelope(&raw)?;
        if !body.success {
            return Err(application_error(body.error, EXTRACT_FALLBACK_MESSAGE));
        }
        Ok(ExtractedText {
            text: body.text.unwrap_or_default(),
        })
    }
}

/// These endpoints answer with a `success` envelope on any status, so the
/// body is read first. A body that is not an envelope falls back to the status.
fn decode_envelope<T: serde::de::DeserializeOwned>(raw: &RawResponse) -> Result<T, SubmitError> {
    match raw.decode() {
        Ok(body) => Ok(body),
        Err(_) if !raw.is_success() => Err(raw.status_error()),
        Err(err) => Err(err),
    }
}

fn application_error(message: Option<String>, fallback: &str) -> SubmitError {
    let message = message
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| fallback.to_string());
    SubmitError::new(FailureKind::Application, message)
}

pub fn data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Mime type for an image file, judged by extension.
pub fn image_mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif") | Some("tiff") => "image/tiff",
        _ => "image/png",
    }
}
