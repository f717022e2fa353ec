//! レジストリセンターAPIハンドラー
//!
//! セキュリティ有効時はゲートウェイからACLトークンを取得し、そのトークンで
//! レジストリクライアントを生成して一つの操作を呼び出す。

use super::AppError;
use crate::common::error::UiError;
use crate::registry::{make_registry_client, RegistryClient};
use crate::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::debug;

/// サービス一覧レスポンスのContent-Type
pub const JSON_UTF8_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// GET /api/v3/registercenter/service/all - 登録済みサービス一覧
pub async fn get_registered_service_all(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let client = registry_client_for_request(&state, &headers).await?;

    let endpoints = client
        .get_all_service_endpoints()
        .await
        .map_err(UiError::RegistryOperation)?;

    let body = serde_json::to_vec(&endpoints).map_err(UiError::Serialization)?;

    debug!(count = endpoints.len(), "Listed registered services");

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, JSON_UTF8_CONTENT_TYPE)],
        body,
    )
        .into_response())
}

/// GET /api/v3/registercenter/ping - レジストリ死活確認
///
/// 応答可能なら200（空ボディ）、応答しなければ503。
pub async fn registry_is_alive(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let client = registry_client_for_request(&state, &headers).await?;

    if !client.is_alive().await {
        return Err(UiError::RegistryNotAlive.into());
    }

    Ok(StatusCode::OK)
}

/// リクエスト用のレジストリクライアントを生成
///
/// セキュリティ無効時はゲートウェイに問い合わせず、空のトークンを使う。
async fn registry_client_for_request(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Box<dyn RegistryClient>, UiError> {
    let token = if state.config.security_enabled {
        let authorization = headers.get(header::AUTHORIZATION).map(|v| v.as_bytes());
        state.acl_fetcher.fetch(authorization).await?.secret_id
    } else {
        String::new()
    };

    make_registry_client(
        state.registry_factory.as_ref(),
        &state.config.registry,
        &token,
    )
    .map_err(UiError::ClientConstruction)
}
