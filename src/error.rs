//! Configuration errors.

use thiserror::Error;

/// Errors raised when an [`AllocationConfig`](crate::allocation::AllocationConfig)
/// does not describe a complete priority table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    /// The priority table does not have one row per group.
    #[error("expected priorities for {expected} groups, got {actual}")]
    GroupCountMismatch { expected: usize, actual: usize },

    /// A group's priority row does not rank every topic.
    #[error("group {group} ranks {actual} topics, expected {expected}")]
    PriorityLengthMismatch {
        group: usize,
        expected: usize,
        actual: usize,
    },

    /// A repeatable topic index lies outside `0..topic_count`.
    #[error("repeatable topic {topic} is out of range for {topic_count} topics")]
    RepeatableOutOfRange { topic: usize, topic_count: usize },
}
