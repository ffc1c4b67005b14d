//! JSON bodies exchanged with the scraping server.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{CompanyResult, PageImage, PageInfo, PageLink};

const NO_DATA_METRIC: &str = "NA";

#[derive(Debug, Serialize)]
pub(crate) struct BatchRequestBody<'a> {
    pub urls: &'a [String],
}

#[derive(Debug, Deserialize)]
pub(crate) struct BatchResponseBody {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub results: Option<Vec<WireCompanyResult>>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCompanyResult {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub employee_count: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl From<WireCompanyResult> for CompanyResult {
    fn from(wire: WireCompanyResult) -> Self {
        let employee_count = match wire.employee_count {
            None | Some(Value::Null) => NO_DATA_METRIC.to_string(),
            Some(Value::String(text)) if text.trim().is_empty() => NO_DATA_METRIC.to_string(),
            Some(Value::String(text)) => text,
            Some(other) => other.to_string(),
        };
        CompanyResult {
            url: wire.url,
            employee_count,
            error: wire.error.filter(|message| !message.is_empty()),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GatherRequestBody<'a> {
    pub url: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GatherResponseBody {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub links: Vec<WireLink>,
    #[serde(default)]
    pub images: Vec<WireImage>,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireLink {
    #[serde(default)]
    pub text: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireImage {
    #[serde(default)]
    pub alt: String,
    pub url: String,
}

impl GatherResponseBody {
    pub(crate) fn into_page_info(self, requested_url: &str) -> PageInfo {
        PageInfo {
            url: self.url.unwrap_or_else(|| requested_url.to_string()),
            title: self.title.filter(|t| !t.is_empty()),
            content: self.content.filter(|c| !c.is_empty()),
            links: self
                .links
                .into_iter()
                .map(|link| PageLink {
                    text: link.text,
                    url: link.url,
                })
                .collect(),
            images: self
                .images
                .into_iter()
                .map(|image| PageImage {
                    alt: image.alt,
                    url: image.url,
                })
                .collect(),
            status_code: self.status_code,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ExtractTextRequestBody {
    pub image: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExtractTextResponseBody {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> CompanyResult {
        serde_json::from_str::<WireCompanyResult>(json).unwrap().into()
    }

    #[test]
    fn missing_or_null_count_becomes_na() {
        assert_eq!(decode(r#"{"url":"u"}"#).employee_count, "NA");
        assert_eq!(decode(r#"{"url":"u","employee_count":null}"#).employee_count, "NA");
    }

    #[test]
    fn numeric_count_is_stringified() {
        assert_eq!(decode(r#"{"url":"u","employee_count":120}"#).employee_count, "120");
    }

    #[test]
    fn empty_error_is_treated_as_none() {
        assert_eq!(decode(r#"{"url":"u","employee_count":"5","error":""}"#).error, None);
    }
}
