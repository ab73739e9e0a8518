//! Preference-driven topic allocation.
//!
//! Assigns a fixed set of topics to a fixed set of groups, where every
//! group ranks every topic with an integer priority (higher = more
//! preferred). Allocation proceeds in rounds, each producing exactly one
//! assignment:
//!
//! - **Direct assignment**: the first group whose current top choice is
//!   not matched or exceeded by any other remaining group takes it.
//! - **Lottery**: otherwise the topic that is the top choice of the most
//!   groups is drawn uniformly at random among those groups.
//!
//! Topics may be marked *repeatable*, in which case they stay available
//! after being assigned.
//!
//! # Architecture
//!
//! The crate follows the layout of the U-Engine algorithm crates: a
//! configuration object with a builder, pure ranking primitives, a
//! stepwise [`allocation::Allocator`] state machine and a batch
//! [`allocation::AllocationRunner`] that drives it to completion.

pub mod allocation;
mod error;

pub use error::AllocError;
