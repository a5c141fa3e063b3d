use crate::features::subscriptions::models::Subscription;
use std::collections::BTreeMap;

/// 1回あたりのコストを計算する
///
/// # 引数
/// * `monthly_cost` - 月額料金
/// * `usage_count` - 利用回数
///
/// # 戻り値
/// 月額料金÷利用回数、利用回数が0以下の場合はNone
pub fn cost_per_use(monthly_cost: f64, usage_count: i64) -> Option<f64> {
    if usage_count <= 0 {
        return None;
    }
    Some(monthly_cost / usage_count as f64)
}

/// カテゴリごとのサブスクリプション数を数える
///
/// カテゴリ名は正規化せず、大文字小文字を区別する。
///
/// # 引数
/// * `subscriptions` - サブスクリプションのリスト
///
/// # 戻り値
/// カテゴリ名の昇順に並んだ件数
pub fn count_by_category(subscriptions: &[Subscription]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for subscription in subscriptions {
        *counts.entry(subscription.category.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use quickcheck_macros::quickcheck;

    fn subscription(id: i64, category: &str) -> Subscription {
        Subscription {
            id,
            name: format!("Service {id}"),
            category: category.to_string(),
            monthly_cost: 10.0,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            color: None,
        }
    }

    #[test]
    fn test_cost_per_use() {
        assert_eq!(cost_per_use(15.0, 3), Some(5.0));
        assert_eq!(cost_per_use(10.0, 4), Some(2.5));
        assert_eq!(cost_per_use(10.0, 0), None);
    }

    #[test]
    fn test_count_by_category_is_case_sensitive_and_sorted() {
        let subscriptions = vec![
            subscription(1, "Streaming"),
            subscription(2, "Music"),
            subscription(3, "streaming"),
            subscription(4, "Streaming"),
        ];

        let counts = count_by_category(&subscriptions);

        let entries: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(
            entries,
            vec![("Music", 1), ("Streaming", 2), ("streaming", 1)]
        );
    }

    #[test]
    fn test_count_by_category_empty() {
        assert!(count_by_category(&[]).is_empty());
    }

    #[quickcheck]
    fn prop_category_counts_sum_to_input_length(categories: Vec<String>) -> bool {
        let subscriptions: Vec<Subscription> = categories
            .iter()
            .enumerate()
            .map(|(i, category)| subscription(i as i64, category))
            .collect();

        let counts = count_by_category(&subscriptions);
        let keys: Vec<&String> = counts.keys().collect();

        counts.values().sum::<usize>() == subscriptions.len()
            && keys.windows(2).all(|pair| pair[0] < pair[1])
    }

    #[quickcheck]
    fn prop_cost_per_use_is_exact_division(cost: u32, count: u8) -> bool {
        let cost = f64::from(cost) / 100.0;
        match cost_per_use(cost, i64::from(count)) {
            None => count == 0,
            Some(value) => count > 0 && value == cost / f64::from(count),
        }
    }
}
