//! Allocation identifiers and outputs.

use std::fmt;

/// Zero-based group index.
pub type GroupId = usize;

/// Zero-based topic index.
pub type TopicId = usize;

/// One group receiving one topic.
///
/// Displayed with 1-based labels, e.g. `Group 3: Topic 7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub group: GroupId,
    pub topic: TopicId,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Group {}: Topic {}", self.group + 1, self.topic + 1)
    }
}

/// How a round's assignment was decided.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resolution {
    /// No other remaining group rated the topic as high.
    Unique,

    /// The most contested topic had a single interested group.
    OnlyInterested,

    /// Drawn uniformly among `candidates`, all of whom had the topic as
    /// their current top choice.
    Lottery { candidates: Vec<GroupId> },
}

/// The single assignment produced by one round.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundOutcome {
    /// 1-based round number.
    pub round: usize,
    pub assignment: Assignment,
    pub resolution: Resolution,
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let group = self.assignment.group + 1;
        let topic = self.assignment.topic + 1;
        match &self.resolution {
            Resolution::Unique => write!(
                f,
                "Group {group} has been directly assigned Topic {topic} (unique highest priority)."
            ),
            Resolution::OnlyInterested => write!(
                f,
                "Group {group} has been assigned Topic {topic} (only group interested)."
            ),
            Resolution::Lottery { candidates } => {
                write!(f, "Lottery for Topic {topic} among")?;
                for candidate in candidates {
                    write!(f, " Group {}", candidate + 1)?;
                }
                write!(f, ": Group {group} has been assigned Topic {topic}.")
            }
        }
    }
}

/// Result of an allocation run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationResult {
    /// Assignments in the order they were made.
    pub assignments: Vec<Assignment>,

    /// Per-round outcomes, parallel to `assignments`.
    pub history: Vec<RoundOutcome>,

    /// Groups that never received a topic, ascending.
    pub unassigned_groups: Vec<GroupId>,

    /// Topics still in the pool at the end, ascending. Repeatable topics
    /// appear here even when assigned.
    pub remaining_topics: Vec<TopicId>,

    /// Number of rounds executed.
    pub rounds: usize,

    /// Whether the continuation callback declined another round.
    pub stopped_early: bool,

    /// Whether cancelled externally.
    pub cancelled: bool,
}

impl AllocationResult {
    /// The topic assigned to `group`, if any.
    pub fn topic_of(&self, group: GroupId) -> Option<TopicId> {
        self.assignments
            .iter()
            .find(|a| a.group == group)
            .map(|a| a.topic)
    }
}

impl fmt::Display for AllocationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Final allocation of topics to groups (in order of selection):"
        )?;
        for assignment in &self.assignments {
            writeln!(f, "{assignment}")?;
        }
        Ok(())
    }
}
