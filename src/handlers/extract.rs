// handlers/extract.rs - Request extractors that reject with ApiError
//
// Axum's stock rejections answer in plain text; these keep every failure in
// the JSON error envelope.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use mongodb::bson::oid::ObjectId;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON request body
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ApiError::invalid_json(rejection.body_text())),
        }
    }
}

/// `:id` path segment parsed as an ObjectId
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoId(pub ObjectId);

impl DemoId {
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        ObjectId::parse_str(raw)
            .map(DemoId)
            .map_err(|_| ApiError::invalid_id(format!("invalid demo id format: {}", raw)))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for DemoId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        DemoId::parse(&raw)
    }
}
