use super::models::{CalendarMarkings, DayUsage};
use super::service;
use crate::features::usage::models::UsageFilter;
use crate::features::usage::repository as usage;
use crate::shared::utils::{format_display_date, format_usage_date, YearMonth};
use crate::AppState;
use chrono::NaiveDate;

/// カレンダー表示用のマークを取得する
///
/// # 引数
/// * `state` - アプリケーション状態
/// * `month` - 指定された場合はその月の記録のみ
///
/// # 戻り値
/// 日付ごとのマーク一覧、または失敗時はエラーメッセージ
pub fn get_calendar_markings(
    state: &AppState,
    month: Option<YearMonth>,
) -> Result<CalendarMarkings, String> {
    let filter = month.map(UsageFilter::Month).unwrap_or_default();

    let db = state
        .lock_db()
        .map_err(|e| e.report("データベースロックの取得"))?;

    let records = usage::find_usage(&db, &filter).map_err(|e| e.report("利用記録の取得"))?;

    Ok(service::build_calendar_markings(&records))
}

/// 選択された日の利用内容を取得する
///
/// # 引数
/// * `state` - アプリケーション状態
/// * `date` - 選択された日
///
/// # 戻り値
/// その日のマーク一覧（記録が無ければ空）、または失敗時はエラーメッセージ
pub fn get_day_usage(state: &AppState, date: NaiveDate) -> Result<DayUsage, String> {
    let db = state
        .lock_db()
        .map_err(|e| e.report("データベースロックの取得"))?;

    let records = usage::find_usage(&db, &UsageFilter::Date(date))
        .map_err(|e| e.report("利用記録の取得"))?;
    let markings = service::build_calendar_markings(&records);

    Ok(DayUsage {
        date: format_usage_date(date),
        date_label: format_display_date(date),
        markings: service::markings_for_date(&markings, date).to_vec(),
    })
}
