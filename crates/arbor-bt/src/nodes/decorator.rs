#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use arbor_core::{Blackboard, Host, TickContext};

use crate::{Behavior, BtError, Node, Result, SetupContext, Status};

/// Generates the parts every decorator shares: forwarding `setup` to the child and aborting the
/// child when the decorator itself is aborted.
macro_rules! forward_to_child {
    () => {
        fn setup(&mut self, setup: &mut SetupContext<'_>) -> Result<()> {
            self.child.setup(setup)
        }

        fn on_abort(
            &mut self,
            ctx: &TickContext,
            agent: W::Agent,
            world: &mut W,
            blackboard: &mut Blackboard,
        ) {
            self.child.abort(ctx, agent, world, blackboard);
        }
    };
}

/// Swaps `Success` and `Failure`.
pub struct Invert<W>
where
    W: Host + 'static,
{
    child: Node<W>,
}

impl<W> Invert<W>
where
    W: Host + 'static,
{
    pub fn new(child: Node<W>) -> Self {
        Self { child }
    }
}

impl<W> Behavior<W> for Invert<W>
where
    W: Host + 'static,
{
    fn name(&self) -> &str {
        "Invert"
    }

    forward_to_child!();

    fn execute(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Result<Status> {
        Ok(self.child.tick(ctx, agent, world, blackboard)?.invert())
    }
}

/// Reports `Failure` as `Success`.
pub struct ForceSuccess<W>
where
    W: Host + 'static,
{
    child: Node<W>,
}

impl<W> ForceSuccess<W>
where
    W: Host + 'static,
{
    pub fn new(child: Node<W>) -> Self {
        Self { child }
    }
}

impl<W> Behavior<W> for ForceSuccess<W>
where
    W: Host + 'static,
{
    fn name(&self) -> &str {
        "ForceSuccess"
    }

    forward_to_child!();

    fn execute(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Result<Status> {
        Ok(match self.child.tick(ctx, agent, world, blackboard)? {
            Status::Failure => Status::Success,
            other => other,
        })
    }
}

/// Reports `Success` as `Failure`.
pub struct ForceFailure<W>
where
    W: Host + 'static,
{
    child: Node<W>,
}

impl<W> ForceFailure<W>
where
    W: Host + 'static,
{
    pub fn new(child: Node<W>) -> Self {
        Self { child }
    }
}

impl<W> Behavior<W> for ForceFailure<W>
where
    W: Host + 'static,
{
    fn name(&self) -> &str {
        "ForceFailure"
    }

    forward_to_child!();

    fn execute(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Result<Status> {
        Ok(match self.child.tick(ctx, agent, world, blackboard)? {
            Status::Success => Status::Failure,
            other => other,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RepeatConfig {
    /// Number of successful child runs required.
    pub times: u32,
}

/// Re-runs a succeeding child until it has succeeded `times` times, one child run per tick.
pub struct Repeat<W>
where
    W: Host + 'static,
{
    child: Node<W>,
    config: RepeatConfig,
    completed: u32,
}

impl<W> Repeat<W>
where
    W: Host + 'static,
{
    pub fn new(config: RepeatConfig, child: Node<W>) -> Self {
        Self {
            child,
            config,
            completed: 0,
        }
    }
}

impl<W> Behavior<W> for Repeat<W>
where
    W: Host + 'static,
{
    fn name(&self) -> &str {
        "Repeat"
    }

    fn setup(&mut self, setup: &mut SetupContext<'_>) -> Result<()> {
        if self.config.times == 0 {
            return Err(BtError::InvalidConfig {
                node: "Repeat".to_owned(),
                reason: "times must be at least 1".to_owned(),
            });
        }
        self.child.setup(setup)
    }

    fn begin(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
        self.completed = 0;
    }

    fn execute(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Result<Status> {
        match self.child.tick(ctx, agent, world, blackboard)? {
            Status::Success => {
                self.completed += 1;
                if self.completed >= self.config.times {
                    Ok(Status::Success)
                } else {
                    Ok(Status::Running)
                }
            }
            other => Ok(other),
        }
    }

    fn on_abort(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        self.child.abort(ctx, agent, world, blackboard);
    }
}

/// Restarts the child after every success; succeeds once the child fails.
pub struct RepeatUntilFailure<W>
where
    W: Host + 'static,
{
    child: Node<W>,
}

impl<W> RepeatUntilFailure<W>
where
    W: Host + 'static,
{
    pub fn new(child: Node<W>) -> Self {
        Self { child }
    }
}

impl<W> Behavior<W> for RepeatUntilFailure<W>
where
    W: Host + 'static,
{
    fn name(&self) -> &str {
        "RepeatUntilFailure"
    }

    forward_to_child!();

    fn execute(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Result<Status> {
        Ok(match self.child.tick(ctx, agent, world, blackboard)? {
            Status::Success => Status::Running,
            Status::Failure => Status::Success,
            other => other,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CooldownConfig {
    /// Ticks after a completed child run during which re-entry fails.
    pub ticks: u64,
}

/// Gates re-entry: once the child completes, runs that begin within the cooldown window fail
/// without touching the child. An aborted child run does not start the cooldown.
pub struct Cooldown<W>
where
    W: Host + 'static,
{
    child: Node<W>,
    config: CooldownConfig,
    ready_at: Option<u64>,
    gated: bool,
}

impl<W> Cooldown<W>
where
    W: Host + 'static,
{
    pub fn new(config: CooldownConfig, child: Node<W>) -> Self {
        Self {
            child,
            config,
            ready_at: None,
            gated: false,
        }
    }
}

impl<W> Behavior<W> for Cooldown<W>
where
    W: Host + 'static,
{
    fn name(&self) -> &str {
        "Cooldown"
    }

    forward_to_child!();

    fn begin(
        &mut self,
        ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
        self.gated = self.ready_at.is_some_and(|ready| ctx.tick < ready);
    }

    fn execute(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Result<Status> {
        if self.gated {
            return Ok(Status::Failure);
        }

        let status = self.child.tick(ctx, agent, world, blackboard)?;
        if status.is_terminal() {
            self.ready_at = Some(ctx.tick.saturating_add(self.config.ticks).saturating_add(1));
        }
        Ok(status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeoutConfig {
    /// Child executions allowed per run.
    pub ticks: u64,
}

/// Gives the child `ticks` executions per run. A child still running after the last of them is
/// aborted on the same tick and the timeout reports `Failure`.
pub struct Timeout<W>
where
    W: Host + 'static,
{
    child: Node<W>,
    config: TimeoutConfig,
    elapsed: u64,
}

impl<W> Timeout<W>
where
    W: Host + 'static,
{
    pub fn new(config: TimeoutConfig, child: Node<W>) -> Self {
        Self {
            child,
            config,
            elapsed: 0,
        }
    }
}

impl<W> Behavior<W> for Timeout<W>
where
    W: Host + 'static,
{
    fn name(&self) -> &str {
        "Timeout"
    }

    fn setup(&mut self, setup: &mut SetupContext<'_>) -> Result<()> {
        if self.config.ticks == 0 {
            return Err(BtError::InvalidConfig {
                node: "Timeout".to_owned(),
                reason: "ticks must be at least 1".to_owned(),
            });
        }
        self.child.setup(setup)
    }

    fn begin(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
        self.elapsed = 0;
    }

    fn execute(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Result<Status> {
        self.elapsed += 1;
        let status = self.child.tick(ctx, agent, world, blackboard)?;
        if status.is_running() && self.elapsed >= self.config.ticks {
            tracing::debug!(child = self.child.name(), ticks = self.elapsed, "timed out");
            self.child.abort(ctx, agent, world, blackboard);
            return Ok(Status::Failure);
        }
        Ok(status)
    }

    fn on_abort(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        self.child.abort(ctx, agent, world, blackboard);
    }
}
