/// 日付・年月の変換ユーティリティ
pub mod dates;

use crate::shared::errors::{AppError, AppResult};

pub use dates::{
    format_display_date, format_usage_date, iso_to_display, parse_display_date,
    parse_usage_date, today_in, YearMonth,
};

/// 名前・カテゴリの最大文字数
const MAX_TEXT_LENGTH: usize = 100;

/// 月額料金のバリデーション
///
/// # 引数
/// * `cost` - 月額料金
///
/// # 戻り値
/// 有効な金額の場合はOk(())、無効な場合はエラー
///
/// # バリデーション規則
/// - 有限の正の数値であること
pub fn validate_monthly_cost(cost: f64) -> AppResult<()> {
    if !cost.is_finite() {
        return Err(AppError::validation("無効な月額料金です"));
    }

    if cost <= 0.0 {
        return Err(AppError::validation(
            "月額料金は正の数値で入力してください",
        ));
    }

    Ok(())
}

/// 必須フィールドのバリデーション
///
/// # 引数
/// * `text` - 検証対象の文字列
/// * `field_name` - フィールド名（エラーメッセージ用）
///
/// # 戻り値
/// 前後の空白を除いた値が空でなく上限以内の場合はOk(())、それ以外はエラー
pub fn validate_required_field(text: &str, field_name: &str) -> AppResult<()> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field_name}は必須項目です")));
    }

    let char_count = trimmed.chars().count();
    if char_count > MAX_TEXT_LENGTH {
        return Err(AppError::validation(format!(
            "{field_name}は{MAX_TEXT_LENGTH}文字以内で入力してください（現在: {char_count}文字）"
        )));
    }

    Ok(())
}

/// カラーコードのバリデーション（#RRGGBB形式）
pub fn validate_color_hex(color: &str) -> AppResult<()> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());

    if !valid {
        return Err(AppError::validation(format!(
            "カラーコードは#RRGGBB形式で指定してください: {color}"
        )));
    }

    Ok(())
}

/// 文字列の正規化（前後の空白を削除）
pub fn normalize_string(text: &str) -> String {
    text.trim().to_string()
}

/// 金額を小数点以下2桁で表示用にフォーマット
pub fn format_cost(amount: f64) -> String {
    format!("{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_monthly_cost() {
        assert!(validate_monthly_cost(15.0).is_ok());
        assert!(validate_monthly_cost(0.01).is_ok());
        assert!(validate_monthly_cost(9.99).is_ok());

        assert!(validate_monthly_cost(0.0).is_err());
        assert!(validate_monthly_cost(-1.0).is_err());
        assert!(validate_monthly_cost(f64::NAN).is_err());
        assert!(validate_monthly_cost(f64::INFINITY).is_err());
        assert!(validate_monthly_cost(1_000_000.0).is_ok());
    }

    #[test]
    fn test_validate_required_field() {
        assert!(validate_required_field("Netflix", "名前").is_ok());
        assert!(validate_required_field("  Netflix  ", "名前").is_ok());

        assert!(validate_required_field("", "名前").is_err());
        assert!(validate_required_field("   ", "名前").is_err());
        assert!(validate_required_field(&"a".repeat(101), "名前").is_err());

        // 保存されるのは前後の空白を除いた値なので、空白は文字数に含めない
        let padded = format!("  {}  ", "a".repeat(100));
        assert!(validate_required_field(&padded, "名前").is_ok());
    }

    #[test]
    fn test_validate_color_hex() {
        assert!(validate_color_hex("#FF5733").is_ok());
        assert!(validate_color_hex("#009688").is_ok());
        assert!(validate_color_hex("#abcdef").is_ok());

        assert!(validate_color_hex("FF5733").is_err());
        assert!(validate_color_hex("#FF573").is_err());
        assert!(validate_color_hex("#GG5733").is_err());
        assert!(validate_color_hex("#ＦＦ5733").is_err());
    }

    #[test]
    fn test_normalize_string() {
        assert_eq!(normalize_string("  Streaming  "), "Streaming");
        assert_eq!(normalize_string("   "), "");
    }

    #[test]
    fn test_format_cost() {
        assert_eq!(format_cost(15.0), "15.00");
        assert_eq!(format_cost(5.0 / 3.0), "1.67");
    }
}
