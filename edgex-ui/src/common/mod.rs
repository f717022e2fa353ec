//! 共通型定義
//!
//! ハンドラー・ゲートウェイ・レジストリクライアント間で共有する型とエラー

pub mod error;
pub mod types;
