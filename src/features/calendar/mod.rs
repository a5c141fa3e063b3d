/// 利用カレンダー機能モジュール
///
/// 利用記録を日付ごとのカラーマークに変換する。
pub mod commands;
pub mod models;
pub mod service;

pub use commands::{get_calendar_markings, get_day_usage};
pub use models::{CalendarMarking, CalendarMarkings, DayUsage, FALLBACK_MARKING_COLOR};
pub use service::{build_calendar_markings, markings_for_date};
