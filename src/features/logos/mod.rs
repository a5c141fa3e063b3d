/// ロゴ取得機能モジュール
///
/// 外部のロゴ取得元から画像を取得し、失敗時は名前の頭文字で代替する。
pub mod commands;
pub mod models;
pub mod service;

pub use commands::get_subscription_logo;
pub use models::{fallback_glyph, Logo};
pub use service::LogoService;
