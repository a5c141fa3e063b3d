use crate::shared::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 利用日の保存形式（YYYY-MM-DD）
pub const USAGE_DATE_FORMAT: &str = "%Y-%m-%d";

/// 表示用および開始日の保存形式（DD/MM/YYYY）
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// 日付を表示形式（DD/MM/YYYY）に変換する
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// 表示形式（DD/MM/YYYY）の文字列を日付に変換する
///
/// ゼロ埋めされていない日・月（例: "1/6/2024"）も受け付ける。
///
/// # 引数
/// * `value` - 日付文字列
///
/// # 戻り値
/// 日付、または形式が不正な場合はバリデーションエラー
pub fn parse_display_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DISPLAY_DATE_FORMAT).map_err(|e| {
        AppError::validation(format!("日付はDD/MM/YYYY形式で入力してください ({value}): {e}"))
    })
}

/// 日付を利用日の保存形式（YYYY-MM-DD）に変換する
pub fn format_usage_date(date: NaiveDate) -> String {
    date.format(USAGE_DATE_FORMAT).to_string()
}

/// 利用日の保存形式（YYYY-MM-DD）の文字列を日付に変換する
pub fn parse_usage_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), USAGE_DATE_FORMAT).map_err(|e| {
        AppError::validation(format!("日付はYYYY-MM-DD形式で入力してください ({value}): {e}"))
    })
}

/// ISO形式の日付文字列を表示形式に変換する
///
/// # 引数
/// * `iso_date` - YYYY-MM-DD形式の日付
///
/// # 戻り値
/// DD/MM/YYYY形式の日付
pub fn iso_to_display(iso_date: &str) -> AppResult<String> {
    parse_usage_date(iso_date).map(format_display_date)
}

/// 指定タイムゾーンでの今日の日付を取得する
pub fn today_in(timezone: Tz) -> NaiveDate {
    Utc::now().with_timezone(&timezone).date_naive()
}

/// 年と月の組（統計・カレンダーの集計単位）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// 年と月から作成する
    ///
    /// # 戻り値
    /// 年月、または月が1〜12の範囲外・年が4桁でない場合はエラー
    pub fn new(year: i32, month: u32) -> AppResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(AppError::validation(format!(
                "月は1から12の間で指定してください: {month}"
            )));
        }
        if !(1..=9999).contains(&year) {
            return Err(AppError::validation(format!(
                "年は4桁で指定してください: {year}"
            )));
        }
        Ok(Self { year, month })
    }

    /// 日付が属する年月を取得する
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// 指定タイムゾーンでの今月を取得する
    pub fn current(timezone: Tz) -> Self {
        Self::of(today_in(timezone))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// 利用日の前方一致検索用プレフィックス（"YYYY-MM-"）
    pub fn usage_prefix(&self) -> String {
        format!("{self}-")
    }

    /// 表示用ラベル（"MM/YYYY"）
    pub fn label(&self) -> String {
        format!("{:02}/{:04}", self.month, self.year)
    }

    /// 日付がこの年月に含まれるかどうか
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid =
            || AppError::validation(format!("年月はYYYY-MM形式で指定してください: {value}"));

        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}
