//! Body extractor accepting JSON, urlencoded forms and multipart forms.
//!
//! Browser admin tools submit listings as `multipart/form-data` with every
//! field as text; API clients send JSON. Both end up as the same validated
//! request type.

use std::collections::HashMap;
use std::str::FromStr;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::validated_json::validate;
use crate::errors::{AppError, AppResult};

/// Text fields of a submitted form, by name.
#[derive(Debug, Default)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self(fields)
    }

    /// Remove a field; blank values count as absent.
    pub fn take(&mut self, name: &str) -> Option<String> {
        self.0.remove(name).filter(|v| !v.trim().is_empty())
    }

    /// Remove a field the form must carry.
    pub fn required(&mut self, name: &str) -> AppResult<String> {
        self.take(name)
            .ok_or_else(|| AppError::validation(format!("{}: field required", name)))
    }

    /// Remove and parse an optional field.
    pub fn parse<T: FromStr>(&mut self, name: &str) -> AppResult<Option<T>> {
        self.take(name)
            .map(|raw| {
                raw.trim()
                    .parse()
                    .map_err(|_| AppError::validation(format!("{}: invalid value '{}'", name, raw)))
            })
            .transpose()
    }

    /// Remove and parse a field the form must carry.
    pub fn parse_required<T: FromStr>(&mut self, name: &str) -> AppResult<T> {
        self.parse(name)?
            .ok_or_else(|| AppError::validation(format!("{}: field required", name)))
    }
}

/// Request types that can be built from form text fields.
pub trait FromFormFields: Sized {
    fn from_form_fields(fields: FormFields) -> AppResult<Self>;
}

/// Validated body taken from JSON, urlencoded or multipart input,
/// chosen by `Content-Type`.
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + FromFormFields,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let value = if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::validation(e.body_text()))?;
            T::from_form_fields(read_multipart(multipart).await?)?
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| AppError::validation(e.body_text()))?;
            T::from_form_fields(FormFields::new(fields))?
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::validation(e.body_text()))?;
            value
        };

        validate(&value)?;
        Ok(JsonOrForm(value))
    }
}

async fn read_multipart(mut multipart: Multipart) -> AppResult<FormFields> {
    let mut fields = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let text = field
            .text()
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;
        fields.insert(name, text);
    }

    Ok(FormFields::new(fields))
}
