//! Engine-agnostic kernel primitives for the arbor behavior-tree runtime.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod blackboard;
pub mod holder;
pub mod host;
pub mod key;
pub mod tick;

pub use blackboard::Blackboard;
pub use holder::{HolderSlot, HolderToken, Release, MOVEMENT_HOLDER};
pub use host::{AgentId, Host};
pub use key::PropertyKey;
pub use tick::TickContext;
