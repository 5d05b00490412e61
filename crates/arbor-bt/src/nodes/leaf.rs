use std::marker::PhantomData;

use arbor_core::{Blackboard, Host, PropertyKey, TickContext};

use crate::{Behavior, BtError, Result, SetupContext, Status};

/// Succeeds when the predicate holds, fails otherwise. Never runs.
pub struct Condition<F> {
    cond: F,
}

impl<F> Condition<F> {
    pub fn new(cond: F) -> Self {
        Self { cond }
    }
}

impl<F, W> Behavior<W> for Condition<F>
where
    F: FnMut(&TickContext, W::Agent, &W, &Blackboard) -> bool + 'static,
    W: Host + 'static,
{
    fn name(&self) -> &str {
        "Condition"
    }

    fn execute(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Result<Status> {
        Ok(Status::from((self.cond)(ctx, agent, &*world, &*blackboard)))
    }
}

/// Runs for a fixed number of ticks, then succeeds.
pub struct Wait {
    ticks: u32,
    remaining: u32,
}

impl Wait {
    pub fn new(ticks: u32) -> Self {
        Self {
            ticks,
            remaining: ticks,
        }
    }
}

impl<W> Behavior<W> for Wait
where
    W: Host + 'static,
{
    fn name(&self) -> &str {
        "Wait"
    }

    fn begin(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
        self.remaining = self.ticks;
    }

    fn execute(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) -> Result<Status> {
        if self.remaining == 0 {
            return Ok(Status::Success);
        }
        self.remaining -= 1;
        Ok(Status::Running)
    }
}

/// Runs until `seconds` of simulated time have passed, then succeeds.
///
/// Time is summed from [`TickContext::dt_seconds`], so uneven steps are honored. The step that
/// crosses the deadline already reports `Success`.
pub struct Delay {
    seconds: f32,
    elapsed: f32,
}

impl Delay {
    pub fn new(seconds: f32) -> Self {
        Self {
            seconds,
            elapsed: 0.0,
        }
    }
}

impl<W> Behavior<W> for Delay
where
    W: Host + 'static,
{
    fn name(&self) -> &str {
        "Delay"
    }

    fn setup(&mut self, _setup: &mut SetupContext<'_>) -> Result<()> {
        if !self.seconds.is_finite() || self.seconds < 0.0 {
            return Err(BtError::InvalidConfig {
                node: "Delay".to_owned(),
                reason: format!("delay of {} seconds", self.seconds),
            });
        }
        Ok(())
    }

    fn begin(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
        self.elapsed = 0.0;
    }

    fn execute(
        &mut self,
        ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) -> Result<Status> {
        self.elapsed += ctx.dt_seconds;
        if self.elapsed >= self.seconds {
            Ok(Status::Success)
        } else {
            Ok(Status::Running)
        }
    }
}

/// Succeeds when the value channel holds a `T` under `key`; reports missing data as `Error`.
pub struct RequireValue<T> {
    key: PropertyKey,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> RequireValue<T> {
    pub fn new(key: PropertyKey) -> Self {
        Self {
            key,
            _phantom: PhantomData,
        }
    }
}

impl<T, W> Behavior<W> for RequireValue<T>
where
    T: Copy + 'static,
    W: Host + 'static,
{
    fn name(&self) -> &str {
        "RequireValue"
    }

    fn execute(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Result<Status> {
        if blackboard.contains_value::<T>(self.key) {
            Ok(Status::Success)
        } else {
            tracing::debug!(key = %self.key, "required value missing");
            Ok(Status::Error)
        }
    }
}
