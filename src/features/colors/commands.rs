use super::models::ColorPoolStatus;
use super::repository;
use crate::AppState;

/// カラープールの状態を取得する
///
/// # 引数
/// * `state` - アプリケーション状態
///
/// # 戻り値
/// 割り当て可能な色の一覧と残数、または失敗時はエラーメッセージ
pub fn get_color_pool_status(state: &AppState) -> Result<ColorPoolStatus, String> {
    let db = state.lock_db().map_err(|e| e.user_message().to_string())?;

    let available = repository::list_available(&db).map_err(|e| {
        log::error!("カラープールの取得に失敗しました: {e}");
        e.user_message().to_string()
    })?;

    if available.is_empty() {
        log::warn!("カラーパレットを使い切っています");
    }

    Ok(ColorPoolStatus::new(available))
}
