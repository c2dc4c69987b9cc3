//! Tracked/other partitioning of a recall list against a watchlist.
//!
//! A pure derived view: no I/O, no ordering changes. The display layer
//! renders `tracked` as "matches your tracking" above everything else.

use crate::model::{Recall, WatchlistItem};

/// Split `recalls` into `(tracked, other)`.
///
/// A recall is tracked iff some watchlist value, case-folded, is a
/// substring of the recall's case-folded `brand` or `title`. Relative
/// order is preserved within each half. An empty watchlist short-circuits
/// to `([], recalls)` with the input untouched.
pub fn partition_tracked(
    recalls: Vec<Recall>,
    watchlist: &[WatchlistItem],
) -> (Vec<Recall>, Vec<Recall>) {
    if watchlist.is_empty() {
        return (Vec::new(), recalls);
    }

    let needles: Vec<String> = watchlist.iter().map(|w| w.value.to_lowercase()).collect();

    recalls
        .into_iter()
        .partition(|recall| matches_any(recall, &needles))
}

fn matches_any(recall: &Recall, needles: &[String]) -> bool {
    let title = recall.title.to_lowercase();
    let brand = recall.brand.as_deref().map(str::to_lowercase);

    needles.iter().any(|needle| {
        brand.as_deref().is_some_and(|b| b.contains(needle.as_str()))
            || title.contains(needle.as_str())
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConfidenceLevel;

    fn recall(id: i64, title: &str, brand: Option<&str>) -> Recall {
        Recall {
            id,
            title: title.to_string(),
            brand: brand.map(str::to_string),
            product: None,
            category: None,
            region: "US".to_string(),
            hazard_summary: None,
            official_action: None,
            confidence_level: ConfidenceLevel::Confirmed,
            signal_type: None,
            url: None,
            published_date: None,
            updated_at: "2025-11-20T10:00:00".to_string(),
            created_at: "2025-11-20T10:00:00".to_string(),
        }
    }

    fn watch(value: &str) -> WatchlistItem {
        WatchlistItem {
            id: Some(1),
            user_id: Some(1),
            kind: "BRAND".to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn brand_match_is_case_folded() {
        let recalls = vec![
            recall(1, "Tesla Model 3 Recall", Some("Tesla")),
            recall(2, "Cough Syrup Contamination", Some("XYZ Pharma")),
        ];
        let (tracked, other) = partition_tracked(recalls, &[watch("tesla")]);
        assert_eq!(tracked.len(), 1);
        assert_eq!(tracked[0].id, 1);
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].id, 2);
    }

    #[test]
    fn title_matches_when_brand_is_absent() {
        let recalls = vec![recall(1, "Baby Formula Recall Expanded", None)];
        let (tracked, other) = partition_tracked(recalls, &[watch("baby formula")]);
        assert_eq!(tracked.len(), 1);
        assert!(other.is_empty());
    }

    #[test]
    fn empty_watchlist_returns_input_unchanged() {
        let recalls = vec![
            recall(3, "C", None),
            recall(1, "A", None),
            recall(2, "B", None),
        ];
        let (tracked, other) = partition_tracked(recalls.clone(), &[]);
        assert!(tracked.is_empty());
        assert_eq!(other, recalls);
    }

    #[test]
    fn order_is_preserved_within_each_half() {
        let recalls = vec![
            recall(1, "Tesla brake issue", Some("Tesla")),
            recall(2, "Unrelated", None),
            recall(3, "Tesla charger fault", Some("Tesla")),
            recall(4, "Also unrelated", None),
        ];
        let (tracked, other) = partition_tracked(recalls, &[watch("Tesla")]);
        let tracked_ids: Vec<i64> = tracked.iter().map(|r| r.id).collect();
        let other_ids: Vec<i64> = other.iter().map(|r| r.id).collect();
        assert_eq!(tracked_ids, vec![1, 3]);
        assert_eq!(other_ids, vec![2, 4]);
    }

    #[test]
    fn any_watch_item_suffices() {
        let recalls = vec![recall(1, "Cough Syrup Contamination", Some("XYZ Pharma"))];
        let list = [watch("tesla"), watch("syrup")];
        let (tracked, _) = partition_tracked(recalls, &list);
        assert_eq!(tracked.len(), 1);
    }
}
