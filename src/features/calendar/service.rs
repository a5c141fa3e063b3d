use super::models::{CalendarMarking, CalendarMarkings, FALLBACK_MARKING_COLOR};
use crate::features::usage::models::UsageRecord;
use crate::shared::utils::format_usage_date;
use chrono::NaiveDate;

/// 利用記録からカレンダーのマークを組み立てる
///
/// 日付完全一致でグループ化し、1件の記録につき1件のマークを作る。
/// 重複除去は行わず、同じ日付内の順序は入力順を保つ。
///
/// # 引数
/// * `records` - 利用記録（挿入順）
///
/// # 戻り値
/// 日付（YYYY-MM-DD）ごとのマーク一覧
pub fn build_calendar_markings(records: &[UsageRecord]) -> CalendarMarkings {
    let mut markings = CalendarMarkings::new();

    for record in records {
        let color = record
            .color
            .clone()
            .unwrap_or_else(|| FALLBACK_MARKING_COLOR.to_string());

        markings
            .entry(format_usage_date(record.usage_date))
            .or_default()
            .push(CalendarMarking {
                color,
                subscription_name: record.subscription_name.clone(),
            });
    }

    markings
}

/// 指定日のマークを取得する（記録が無ければ空）
pub fn markings_for_date(markings: &CalendarMarkings, date: NaiveDate) -> &[CalendarMarking] {
    markings
        .get(&format_usage_date(date))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn record(id: i64, name: &str, date: NaiveDate, color: Option<&str>) -> UsageRecord {
        UsageRecord {
            id,
            subscription_id: Some(id),
            subscription_name: name.to_string(),
            usage_date: date,
            color: color.map(str::to_string),
        }
    }

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn test_two_subscriptions_on_same_day() {
        let records = vec![
            record(1, "A", june(1), Some("blue")),
            record(2, "B", june(1), Some("red")),
        ];

        let markings = build_calendar_markings(&records);

        assert_eq!(markings.len(), 1);
        assert_eq!(
            markings["2024-06-01"],
            vec![
                CalendarMarking {
                    color: "blue".to_string(),
                    subscription_name: "A".to_string(),
                },
                CalendarMarking {
                    color: "red".to_string(),
                    subscription_name: "B".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_no_deduplication_and_input_order() {
        let records = vec![
            record(1, "B", june(2), Some("#000001")),
            record(2, "A", june(2), Some("#000002")),
            record(3, "B", june(2), Some("#000001")),
        ];

        let markings = build_calendar_markings(&records);
        let names: Vec<&str> = markings["2024-06-02"]
            .iter()
            .map(|m| m.subscription_name.as_str())
            .collect();

        assert_eq!(names, vec!["B", "A", "B"]);
    }

    #[test]
    fn test_missing_color_uses_fallback() {
        let markings = build_calendar_markings(&[record(1, "Legacy", june(3), None)]);

        assert_eq!(markings["2024-06-03"][0].color, FALLBACK_MARKING_COLOR);
    }

    #[test]
    fn test_markings_for_date() {
        let markings = build_calendar_markings(&[record(1, "A", june(1), Some("blue"))]);

        assert_eq!(markings_for_date(&markings, june(1)).len(), 1);
        assert!(markings_for_date(&markings, june(2)).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(build_calendar_markings(&[]).is_empty());
    }

    #[quickcheck]
    fn prop_one_marking_per_record_grouped_by_exact_date(entries: Vec<(u8, u8)>) -> bool {
        let records: Vec<UsageRecord> = entries
            .iter()
            .enumerate()
            .map(|(i, (day, name))| {
                let date = june(u32::from(*day % 30) + 1);
                record(i as i64, &format!("S{}", name % 5), date, Some("#123456"))
            })
            .collect();

        let markings = build_calendar_markings(&records);

        let total: usize = markings.values().map(Vec::len).sum();
        let grouped_exactly = markings.iter().all(|(date, day_markings)| {
            let expected: Vec<&str> = records
                .iter()
                .filter(|r| &format_usage_date(r.usage_date) == date)
                .map(|r| r.subscription_name.as_str())
                .collect();
            let actual: Vec<&str> = day_markings
                .iter()
                .map(|m| m.subscription_name.as_str())
                .collect();
            expected == actual
        });

        total == records.len() && grouped_exactly
    }
}
