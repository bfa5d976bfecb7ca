//! Statistics aggregator: summary counts and rankings over a request
//! snapshot.
//!
//! All figures are computed from a point-in-time scan of the request
//! store; nothing is incrementally maintained. The problem-keyword
//! ranking deliberately buckets by the *first word* of the free-text
//! description. That is a crude proxy, not tokenization, and downstream
//! reports depend on exactly this behavior.

use crate::model::{EquipmentCount, KeywordCount, RepairRequest, RequestStatus, StatsReport};
use std::collections::HashMap;

/// Number of buckets kept in each ranking.
const TOP_N: usize = 10;

/// Compute the aggregate report over a snapshot of all requests.
#[must_use]
pub fn compute(requests: &[RepairRequest]) -> StatsReport {
    let done_count = requests
        .iter()
        .filter(|r| r.status == RequestStatus::Done)
        .count() as u64;

    let elapsed: Vec<i64> = requests
        .iter()
        .filter_map(|r| {
            r.completion_date
                .map(|done| (done - r.start_date).num_days())
        })
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let avg_days = if elapsed.is_empty() {
        0.0
    } else {
        elapsed.iter().sum::<i64>() as f64 / elapsed.len() as f64
    };

    let by_equipment_type = top_buckets(requests.iter().map(|r| r.equipment_type.as_str()))
        .into_iter()
        .map(|(name, count)| EquipmentCount { name, count })
        .collect();

    let by_problem_keywords = top_buckets(
        requests
            .iter()
            .filter_map(|r| r.problem_description.split_whitespace().next()),
    )
    .into_iter()
    .map(|(keyword, count)| KeywordCount { keyword, count })
    .collect();

    StatsReport {
        done_count,
        avg_days,
        by_equipment_type,
        by_problem_keywords,
    }
}

/// Count occurrences and keep the top buckets, descending by count.
/// Ties break by key ascending so the output is deterministic.
fn top_buckets<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(String, u64)> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut buckets: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    buckets.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    buckets.truncate(TOP_N);
    buckets
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{RequestId, UserId};
    use chrono::NaiveDate;

    fn request(
        id: i64,
        equipment: &str,
        description: &str,
        status: RequestStatus,
        start: (i32, u32, u32),
        completion: Option<(i32, u32, u32)>,
    ) -> RepairRequest {
        RepairRequest {
            id: RequestId(id),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            equipment_type: equipment.to_string(),
            equipment_model: "M".to_string(),
            problem_description: description.to_string(),
            status,
            client_id: UserId(1),
            master_id: None,
            completion_date: completion
                .map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
            due_date: None,
            extended_due_date: None,
        }
    }

    #[test]
    fn empty_snapshot_yields_zeroes() {
        let report = compute(&[]);
        assert_eq!(report.done_count, 0);
        assert!((report.avg_days - 0.0).abs() < f64::EPSILON);
        assert!(report.by_equipment_type.is_empty());
        assert!(report.by_problem_keywords.is_empty());
    }

    #[test]
    fn done_count_counts_only_done() {
        let report = compute(&[
            request(1, "AC", "broken", RequestStatus::Done, (2026, 1, 1), None),
            request(2, "AC", "broken", RequestStatus::Open, (2026, 1, 1), None),
            request(3, "AC", "broken", RequestStatus::Done, (2026, 1, 1), None),
        ]);
        assert_eq!(report.done_count, 2);
    }

    #[test]
    fn avg_days_over_completed_only() {
        let report = compute(&[
            // 4 days
            request(
                1,
                "AC",
                "broken",
                RequestStatus::Done,
                (2026, 1, 1),
                Some((2026, 1, 5)),
            ),
            // 2 days
            request(
                2,
                "AC",
                "broken",
                RequestStatus::Done,
                (2026, 1, 1),
                Some((2026, 1, 3)),
            ),
            // no completion date: excluded from the average
            request(3, "AC", "broken", RequestStatus::Open, (2026, 1, 1), None),
        ]);
        assert!((report.avg_days - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn equipment_ranking_is_descending_with_stable_ties() {
        let report = compute(&[
            request(1, "Fridge", "hums", RequestStatus::Open, (2026, 1, 1), None),
            request(2, "AC", "rattles", RequestStatus::Open, (2026, 1, 1), None),
            request(3, "AC", "leaks", RequestStatus::Open, (2026, 1, 1), None),
            request(4, "Boiler", "cold", RequestStatus::Open, (2026, 1, 1), None),
        ]);
        let names: Vec<&str> = report
            .by_equipment_type
            .iter()
            .map(|b| b.name.as_str())
            .collect();
        // AC wins on count; Boiler and Fridge tie and sort by name.
        assert_eq!(names, vec!["AC", "Boiler", "Fridge"]);
        assert_eq!(report.by_equipment_type[0].count, 2);
    }

    #[test]
    fn keywords_bucket_by_first_word_only() {
        let report = compute(&[
            request(
                1,
                "AC",
                "noise from the fan",
                RequestStatus::Open,
                (2026, 1, 1),
                None,
            ),
            request(
                2,
                "AC",
                "noise when starting",
                RequestStatus::Open,
                (2026, 1, 1),
                None,
            ),
            request(3, "AC", "leaking", RequestStatus::Open, (2026, 1, 1), None),
            // Whitespace-only description contributes no keyword.
            request(4, "AC", "   ", RequestStatus::Open, (2026, 1, 1), None),
        ]);
        assert_eq!(report.by_problem_keywords.len(), 2);
        assert_eq!(report.by_problem_keywords[0].keyword, "noise");
        assert_eq!(report.by_problem_keywords[0].count, 2);
        assert_eq!(report.by_problem_keywords[1].keyword, "leaking");
    }

    #[test]
    fn rankings_are_capped_at_ten() {
        let requests: Vec<RepairRequest> = (0..15)
            .map(|i| {
                request(
                    i,
                    &format!("type-{i}"),
                    "broken",
                    RequestStatus::Open,
                    (2026, 1, 1),
                    None,
                )
            })
            .collect();
        let report = compute(&requests);
        assert_eq!(report.by_equipment_type.len(), 10);
    }
}
