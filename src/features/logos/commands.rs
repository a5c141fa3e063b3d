use super::models::Logo;
use crate::AppState;

/// サブスクリプションのロゴを取得する
///
/// 取得できない場合は名前の頭文字による代替表示を返す。
///
/// # 引数
/// * `state` - アプリケーション状態
/// * `name` - サブスクリプション名
///
/// # 戻り値
/// 画像または代替表示
pub async fn get_subscription_logo(state: &AppState, name: &str) -> Logo {
    state.logos.fetch(name).await
}
