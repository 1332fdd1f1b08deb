//! Request body of the mutating animal routes
//!
//! The text fields arrive as `multipart/form-data`, `application/json` or
//! `application/x-www-form-urlencoded`. Only a multipart body can carry the
//! `image` file. A request without a `Content-Type` is read as an empty form so
//! that validation reports every missing field.

use axum::{
    async_trait,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{FormRejection, JsonRejection},
        FromRequest, Multipart, Request,
    },
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Deserializer};

use crate::error::AppError;
use crate::storage::UploadedImage;

/// Name of the multipart file field holding the image
pub const IMAGE_FIELD: &str = "image";

/// Text fields of an animal as submitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AnimalForm {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub scientific: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
}

/// Decoded body: text fields plus the optional uploaded file
#[derive(Debug, Clone, Default)]
pub struct AnimalPayload {
    pub form: AnimalForm,
    pub image: Option<UploadedImage>,
}

#[derive(Debug, thiserror::Error)]
pub enum AnimalPayloadRejection {
    #[error(transparent)]
    Multipart(#[from] MultipartRejection),
    #[error(transparent)]
    MultipartField(#[from] MultipartError),
    #[error(transparent)]
    Json(#[from] JsonRejection),
    #[error(transparent)]
    Form(#[from] FormRejection),
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),
}

impl AnimalPayloadRejection {
    fn is_too_large(&self) -> bool {
        let status = match self {
            Self::Multipart(r) => r.status(),
            Self::MultipartField(e) => e.status(),
            Self::Json(r) => r.status(),
            Self::Form(r) => r.status(),
            Self::UnsupportedContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        };
        status == StatusCode::PAYLOAD_TOO_LARGE
    }
}

impl IntoResponse for AnimalPayloadRejection {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "Rejected request body");
        let error = if self.is_too_large() {
            AppError::PayloadTooLarge(self.to_string())
        } else {
            AppError::BadRequest(self.to_string())
        };
        error.into_response()
    }
}

#[async_trait]
impl<S> FromRequest<S> for AnimalPayload
where
    S: Send + Sync,
{
    type Rejection = AnimalPayloadRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_ascii_lowercase());

        let Some(content_type) = content_type else {
            return Ok(Self::default());
        };

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state).await?;
            read_multipart(multipart).await
        } else if content_type.starts_with("application/json") {
            let Json(form) = Json::<AnimalForm>::from_request(req, state).await?;
            Ok(Self { form, image: None })
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(form) = Form::<AnimalForm>::from_request(req, state).await?;
            Ok(Self { form, image: None })
        } else {
            Err(AnimalPayloadRejection::UnsupportedContentType(content_type))
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<AnimalPayload, AnimalPayloadRejection> {
    let mut payload = AnimalPayload::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if let Some(file_name) = field.file_name().map(str::to_string) {
            let bytes = field.bytes().await?;

            // Browsers send an empty unnamed part when no file was chosen
            if name != IMAGE_FIELD || (file_name.is_empty() && bytes.is_empty()) {
                tracing::debug!(field = %name, file = %file_name, "Ignoring file part");
                continue;
            }
            if payload.image.is_some() {
                tracing::debug!(file = %file_name, "Ignoring additional image part");
                continue;
            }

            payload.image = Some(UploadedImage {
                original_name: file_name,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        let slot = match name.as_str() {
            "name" => &mut payload.form.name,
            "scientific" => &mut payload.form.scientific,
            "location" => &mut payload.form.location,
            _ => continue,
        };
        let text = field.text().await?;
        if slot.is_none() {
            *slot = Some(text);
        }
    }

    Ok(payload)
}

/// Accept strings as they are and render other JSON scalars as text
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_form_accepts_missing_and_numeric_fields() {
        let form: AnimalForm =
            serde_json::from_str(r#"{"name": "Lion", "scientific": 42, "extra": true}"#).unwrap();

        assert_eq!(form.name.as_deref(), Some("Lion"));
        assert_eq!(form.scientific.as_deref(), Some("42"));
        assert_eq!(form.location, None);
    }

    #[test]
    fn test_json_null_is_absent() {
        let form: AnimalForm = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(form, AnimalForm::default());
    }
}
