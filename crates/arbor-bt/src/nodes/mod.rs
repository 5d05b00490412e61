//! Built-in composites, decorators and generic leaves.

mod composite;
mod decorator;
mod leaf;
mod parallel;

pub use composite::{ReactiveSelector, ReactiveSequence, Selector, Sequence};
pub use decorator::{
    Cooldown, CooldownConfig, ForceFailure, ForceSuccess, Invert, Repeat, RepeatConfig,
    RepeatUntilFailure, Timeout, TimeoutConfig,
};
pub use leaf::{Condition, Delay, RequireValue, Wait};
pub use parallel::{Parallel, ParallelExit, ParallelPolicy, Threshold};

use arbor_core::Host;

use crate::{Node, Result, SetupContext};

pub(crate) fn setup_all<W>(children: &mut [Node<W>], setup: &mut SetupContext<'_>) -> Result<()>
where
    W: Host + 'static,
{
    for child in children.iter_mut() {
        child.setup(setup)?;
    }
    Ok(())
}
