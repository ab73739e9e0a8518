//! Round-based topic allocation.
//!
//! Each round resolves exactly one group:
//!
//! 1. **Direct-assignment pass**: groups are scanned in ascending index
//!    order. A group's claim on its top remaining topic is *unique* when
//!    no other remaining group rates that topic at least as high. The
//!    first unique claim found is assigned.
//! 2. **Lottery pass**: if no claim is unique, groups are bucketed by
//!    their top remaining topic. The largest bucket (lowest topic index
//!    on ties) is resolved: directly if it holds one group, otherwise by
//!    a uniform random draw.
//!
//! Non-repeatable topics leave the pool once assigned; repeatable topics
//! never do. The run ends when either pool is empty or the caller stops
//! it between rounds.

mod allocator;
mod config;
pub mod ranking;
mod runner;
mod types;

pub use allocator::Allocator;
pub use config::AllocationConfig;
pub use runner::AllocationRunner;
pub use types::{AllocationResult, Assignment, GroupId, Resolution, RoundOutcome, TopicId};
