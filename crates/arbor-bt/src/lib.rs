//! Behavior-tree runtime built on `arbor-core`.
//!
//! Every tree element implements [`Behavior`] and is wrapped in a [`Node`], which owns the
//! lifecycle (`setup`, then runs of `begin` / `execute`.. / `end`, or `on_abort` when cut off).
//! A [`Ticker`] owns the root, the tree's blackboard, and drives one tick per host step.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod error;
pub mod node;
pub mod nodes;
pub mod status;
pub mod ticker;

pub use error::{BtError, Result};
pub use node::{Behavior, Node, NodeId, NodePhase, SetupContext};
pub use nodes::{
    Condition, Cooldown, CooldownConfig, Delay, ForceFailure, ForceSuccess, Invert, Parallel,
    ParallelExit, ParallelPolicy, ReactiveSelector, ReactiveSequence, Repeat, RepeatConfig,
    RepeatUntilFailure, RequireValue, Selector, Sequence, Threshold, Timeout, TimeoutConfig, Wait,
};
pub use status::Status;
pub use ticker::{CompletionPolicy, Ticker, TickerConfig};
