//! Ranking primitives shared by the direct-assignment and lottery passes.
//!
//! All functions are pure and deterministic: sets are scanned in
//! ascending index order and the first maximum wins.

use std::collections::{BTreeMap, BTreeSet};

use super::types::{GroupId, TopicId};

/// Returns the remaining topic `row` rates highest.
///
/// Ties go to the lowest topic index. Returns `None` when
/// `remaining_topics` is empty.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use u_allot::allocation::ranking::top_topic_for;
///
/// let remaining: BTreeSet<usize> = [0, 1, 2].into();
/// assert_eq!(top_topic_for(&[4, 9, 9], &remaining), Some(1));
/// ```
pub fn top_topic_for(row: &[i64], remaining_topics: &BTreeSet<TopicId>) -> Option<TopicId> {
    let mut best: Option<(TopicId, i64)> = None;
    for &topic in remaining_topics {
        let value = row[topic];
        if best.is_none_or(|(_, best_value)| value > best_value) {
            best = Some((topic, value));
        }
    }
    best.map(|(topic, _)| topic)
}

/// Whether `group`'s claim on `topic` is unique among `remaining_groups`.
///
/// The claim fails if any *other* remaining group rates `topic` at least
/// as high as `group` does, so equal ratings disqualify both sides.
pub fn is_unique_claim(
    priorities: &[Vec<i64>],
    group: GroupId,
    topic: TopicId,
    remaining_groups: &BTreeSet<GroupId>,
) -> bool {
    let value = priorities[group][topic];
    remaining_groups
        .iter()
        .filter(|&&other| other != group)
        .all(|&other| priorities[other][topic] < value)
}

/// Buckets remaining groups by their current top choice.
///
/// Keys are in ascending topic order, and each bucket lists groups in
/// ascending order.
pub fn top_choice_buckets(
    priorities: &[Vec<i64>],
    remaining_groups: &BTreeSet<GroupId>,
    remaining_topics: &BTreeSet<TopicId>,
) -> BTreeMap<TopicId, Vec<GroupId>> {
    let mut buckets: BTreeMap<TopicId, Vec<GroupId>> = BTreeMap::new();
    for &group in remaining_groups {
        if let Some(topic) = top_topic_for(&priorities[group], remaining_topics) {
            buckets.entry(topic).or_default().push(group);
        }
    }
    buckets
}

/// Picks the topic with the most interested groups.
///
/// Equally contested topics resolve to the lowest topic index.
pub fn most_contested(
    buckets: &BTreeMap<TopicId, Vec<GroupId>>,
) -> Option<(TopicId, &[GroupId])> {
    let mut best: Option<(TopicId, &[GroupId])> = None;
    for (&topic, groups) in buckets {
        if groups.is_empty() {
            continue;
        }
        if best.is_none_or(|(_, current)| groups.len() > current.len()) {
            best = Some((topic, groups.as_slice()));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[usize]) -> BTreeSet<usize> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_top_topic_strict_max() {
        assert_eq!(top_topic_for(&[1, 7, 3], &set(&[0, 1, 2])), Some(1));
    }

    #[test]
    fn test_top_topic_lowest_index_wins_ties() {
        assert_eq!(top_topic_for(&[2, 9, 5, 9], &set(&[0, 1, 2, 3])), Some(1));
        assert_eq!(top_topic_for(&[2, 9, 5, 9], &set(&[2, 3])), Some(3));
    }

    #[test]
    fn test_top_topic_ignores_exhausted_topics() {
        assert_eq!(top_topic_for(&[10, 1, 4], &set(&[1, 2])), Some(2));
    }

    #[test]
    fn test_top_topic_negative_priorities() {
        assert_eq!(top_topic_for(&[-5, -2, -9], &set(&[0, 1, 2])), Some(1));
    }

    #[test]
    fn test_top_topic_empty_set() {
        assert_eq!(top_topic_for(&[1, 2], &BTreeSet::new()), None);
    }

    #[test]
    fn test_unique_claim() {
        let priorities = vec![vec![5, 1], vec![1, 5]];
        assert!(is_unique_claim(&priorities, 0, 0, &set(&[0, 1])));
        assert!(is_unique_claim(&priorities, 1, 1, &set(&[0, 1])));
    }

    #[test]
    fn test_equal_rating_disqualifies_both() {
        let priorities = vec![vec![10], vec![10]];
        assert!(!is_unique_claim(&priorities, 0, 0, &set(&[0, 1])));
        assert!(!is_unique_claim(&priorities, 1, 0, &set(&[0, 1])));
    }

    #[test]
    fn test_higher_rating_elsewhere_disqualifies() {
        // Group 1 prefers topic 1, but still rates topic 0 above group 0.
        let priorities = vec![vec![3, 0], vec![4, 9]];
        assert!(!is_unique_claim(&priorities, 0, 0, &set(&[0, 1])));
    }

    #[test]
    fn test_unique_claim_ignores_assigned_groups() {
        let priorities = vec![vec![10], vec![10]];
        assert!(is_unique_claim(&priorities, 1, 0, &set(&[1])));
    }

    #[test]
    fn test_buckets() {
        let priorities = vec![vec![9, 1, 1], vec![1, 9, 1], vec![9, 9, 1], vec![1, 1, 9]];
        let buckets = top_choice_buckets(&priorities, &set(&[0, 1, 2, 3]), &set(&[0, 1, 2]));
        assert_eq!(buckets.get(&0), Some(&vec![0, 2]));
        assert_eq!(buckets.get(&1), Some(&vec![1]));
        assert_eq!(buckets.get(&2), Some(&vec![3]));
    }

    #[test]
    fn test_most_contested_picks_largest() {
        let mut buckets = BTreeMap::new();
        buckets.insert(0, vec![3]);
        buckets.insert(4, vec![0, 1, 2]);
        buckets.insert(7, vec![5, 6]);
        assert_eq!(most_contested(&buckets), Some((4, &[0, 1, 2][..])));
    }

    #[test]
    fn test_most_contested_tie_goes_to_lowest_topic() {
        let mut buckets = BTreeMap::new();
        buckets.insert(5, vec![0, 1]);
        buckets.insert(2, vec![2, 3]);
        assert_eq!(most_contested(&buckets), Some((2, &[2, 3][..])));
    }

    #[test]
    fn test_most_contested_empty() {
        assert_eq!(most_contested(&BTreeMap::new()), None);
    }
}
