//! REST APIハンドラー
//!
//! レジストリセンター（サービス一覧、レジストリ死活確認）API

pub mod error;
pub mod registry_center;

use crate::AppState;
use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub use error::AppError;

/// 登録済みサービス一覧のパス
pub const SERVICE_ALL_PATH: &str = "/api/v3/registercenter/service/all";

/// レジストリ死活確認のパス
pub const REGISTRY_PING_PATH: &str = "/api/v3/registercenter/ping";

/// APIルーターを作成
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route(
            SERVICE_ALL_PATH,
            get(registry_center::get_registered_service_all),
        )
        .route(REGISTRY_PING_PATH, get(registry_center::registry_is_alive))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
