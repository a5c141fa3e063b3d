/// カラープール機能モジュール
///
/// サブスクリプションごとに1色を割り当てる固定パレットを管理します：
/// - 割り当て可能な色の一覧取得
/// - 作成時の色の消費（プールへの返却は行わない）
pub mod commands;
pub mod models;
pub mod repository;

// 公開インターフェース
pub use commands::get_color_pool_status;

pub use models::{ColorPoolStatus, DEFAULT_PALETTE};

pub use repository::{consume, count_available, first_available, list_available, seed_palette};
