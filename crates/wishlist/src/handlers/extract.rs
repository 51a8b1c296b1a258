//! `Json` and `Path` extractors whose rejections render as `ApiError`.

use axum::extract::{FromRequest, FromRequestParts};

use super::ApiError;

/// `axum::Json` with a `{"detail": ...}` rejection.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` with a `{"detail": ...}` rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
