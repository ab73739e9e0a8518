//! Allocation configuration.

use std::collections::BTreeSet;

use super::types::{GroupId, TopicId};
use crate::AllocError;

/// Configuration for an allocation run.
///
/// Holds the topic and group counts, the full priority table, the set of
/// repeatable topics and an optional lottery seed.
///
/// Priority values are used as-is. Ties, duplicates, zero and negative
/// values are all valid; a higher value means a stronger preference.
///
/// # Repeatable topics
///
/// There is no default repeatable set. The console program this crate
/// replaces hard-coded the zero-based indices `{1, 9, 12, 13, 14}` while
/// documenting them as "Topics 2, 10, 13, 14", and with 14 topics index
/// 14 does not exist. Callers pass the set they actually mean.
///
/// # Examples
///
/// ```
/// use u_allot::allocation::AllocationConfig;
///
/// let config = AllocationConfig::new(3, 2)
///     .with_priorities(vec![vec![3, 2, 1], vec![1, 3, 2]])
///     .with_repeatable([2])
///     .with_seed(7);
///
/// assert!(config.validate().is_ok());
/// assert!(config.is_repeatable(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationConfig {
    /// Number of topics `T`.
    pub topic_count: usize,

    /// Number of groups `G`.
    pub group_count: usize,

    /// `priorities[g][t]` is group `g`'s priority for topic `t`.
    pub priorities: Vec<Vec<i64>>,

    /// Zero-based indices of topics that may be assigned to several groups.
    #[cfg_attr(feature = "serde", serde(default))]
    pub repeatable: BTreeSet<TopicId>,

    /// Seed for the lottery draw. `None` seeds from OS entropy.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
}

impl AllocationConfig {
    /// Creates a configuration with an all-zero priority table.
    pub fn new(topic_count: usize, group_count: usize) -> Self {
        Self {
            topic_count,
            group_count,
            priorities: vec![vec![0; topic_count]; group_count],
            repeatable: BTreeSet::new(),
            seed: None,
        }
    }

    /// Replaces the whole priority table.
    pub fn with_priorities(mut self, priorities: Vec<Vec<i64>>) -> Self {
        self.priorities = priorities;
        self
    }

    /// Replaces one group's priority row.
    ///
    /// Rows beyond the current table are appended with zeros in between,
    /// so a mismatched group index surfaces in [`validate`](Self::validate).
    pub fn with_group_priorities(mut self, group: GroupId, row: Vec<i64>) -> Self {
        if group >= self.priorities.len() {
            self.priorities.resize(group + 1, vec![0; self.topic_count]);
        }
        self.priorities[group] = row;
        self
    }

    /// Marks the given topics as repeatable.
    pub fn with_repeatable<I: IntoIterator<Item = TopicId>>(mut self, topics: I) -> Self {
        self.repeatable.extend(topics);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Whether `topic` stays available after being assigned.
    pub fn is_repeatable(&self, topic: TopicId) -> bool {
        self.repeatable.contains(&topic)
    }

    /// Validates the shape of the configuration.
    pub fn validate(&self) -> Result<(), AllocError> {
        if self.priorities.len() != self.group_count {
            return Err(AllocError::GroupCountMismatch {
                expected: self.group_count,
                actual: self.priorities.len(),
            });
        }
        for (group, row) in self.priorities.iter().enumerate() {
            if row.len() != self.topic_count {
                return Err(AllocError::PriorityLengthMismatch {
                    group,
                    expected: self.topic_count,
                    actual: row.len(),
                });
            }
        }
        if let Some(&topic) = self.repeatable.range(self.topic_count..).next() {
            return Err(AllocError::RepeatableOutOfRange {
                topic,
                topic_count: self.topic_count,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_valid() {
        let config = AllocationConfig::new(14, 12);
        assert_eq!(config.priorities.len(), 12);
        assert!(config.priorities.iter().all(|row| row.len() == 14));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_group_priorities() {
        let config = AllocationConfig::new(2, 2)
            .with_group_priorities(0, vec![5, 1])
            .with_group_priorities(1, vec![1, 5]);
        assert_eq!(config.priorities, vec![vec![5, 1], vec![1, 5]]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_group_count_mismatch() {
        let config = AllocationConfig::new(2, 3).with_priorities(vec![vec![1, 2]]);
        assert_eq!(
            config.validate(),
            Err(AllocError::GroupCountMismatch {
                expected: 3,
                actual: 1
            })
        );
    }

    #[test]
    fn test_validate_extra_group_row() {
        let config = AllocationConfig::new(2, 1).with_group_priorities(1, vec![1, 2]);
        assert!(matches!(
            config.validate(),
            Err(AllocError::GroupCountMismatch { expected: 1, actual: 2 })
        ));
    }

    #[test]
    fn test_validate_row_length_mismatch() {
        let config = AllocationConfig::new(3, 2).with_priorities(vec![vec![1, 2, 3], vec![1, 2]]);
        assert_eq!(
            config.validate(),
            Err(AllocError::PriorityLengthMismatch {
                group: 1,
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_validate_repeatable_out_of_range() {
        // The legacy predicate named index 14 with only 14 topics.
        let config = AllocationConfig::new(14, 1).with_repeatable([1, 9, 12, 13, 14]);
        assert_eq!(
            config.validate(),
            Err(AllocError::RepeatableOutOfRange {
                topic: 14,
                topic_count: 14
            })
        );
    }

    #[test]
    fn test_unbounded_priorities_are_valid() {
        let config = AllocationConfig::new(3, 2)
            .with_priorities(vec![vec![-4, 0, 1_000], vec![7, 7, 7]]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_error_messages() {
        let err = AllocError::PriorityLengthMismatch {
            group: 2,
            expected: 14,
            actual: 13,
        };
        assert_eq!(err.to_string(), "group 2 ranks 13 topics, expected 14");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{
            "topic_count": 2,
            "group_count": 2,
            "priorities": [[5, 1], [1, 5]],
            "repeatable": [1]
        }"#;
        let config: AllocationConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.is_repeatable(1));
        assert_eq!(config.seed, None);
    }
}
