//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::common::error::UiError;
use axum::{response::IntoResponse, Json};

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub UiError);

impl<E> From<E> for AppError
where
    E: Into<UiError>,
{
    fn from(err: E) -> Self {
        AppError(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.0.status_code();

        // 内部の詳細はログにのみ出力し、レスポンスには外部向けメッセージを使う
        tracing::warn!(status = %status, error = %self.0, "Request failed");

        (status, Json(self.0.to_error_body())).into_response()
    }
}
