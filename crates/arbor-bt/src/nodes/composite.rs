use arbor_core::{Blackboard, Host, TickContext};

use crate::nodes::setup_all;
use crate::{Behavior, Node, Result, SetupContext, Status};

/// Runs children left to right until one does not succeed.
///
/// Remembers the running child and resumes there on the next tick instead of re-checking earlier
/// children.
pub struct Sequence<W>
where
    W: Host + 'static,
{
    children: Vec<Node<W>>,
    index: usize,
}

impl<W> Sequence<W>
where
    W: Host + 'static,
{
    pub fn new(children: Vec<Node<W>>) -> Self {
        Self { children, index: 0 }
    }
}

impl<W> Behavior<W> for Sequence<W>
where
    W: Host + 'static,
{
    fn name(&self) -> &str {
        "Sequence"
    }

    fn setup(&mut self, setup: &mut SetupContext<'_>) -> Result<()> {
        setup_all(&mut self.children, setup)
    }

    fn begin(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
        self.index = 0;
    }

    fn execute(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Result<Status> {
        while self.index < self.children.len() {
            match self.children[self.index].tick(ctx, agent, world, blackboard)? {
                Status::Success => self.index += 1,
                other => return Ok(other),
            }
        }

        Ok(Status::Success)
    }

    fn on_abort(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        if let Some(child) = self.children.get_mut(self.index) {
            child.abort(ctx, agent, world, blackboard);
        }
    }
}

/// Runs children left to right until one does not fail.
pub struct Selector<W>
where
    W: Host + 'static,
{
    children: Vec<Node<W>>,
    index: usize,
}

impl<W> Selector<W>
where
    W: Host + 'static,
{
    pub fn new(children: Vec<Node<W>>) -> Self {
        Self { children, index: 0 }
    }
}

impl<W> Behavior<W> for Selector<W>
where
    W: Host + 'static,
{
    fn name(&self) -> &str {
        "Selector"
    }

    fn setup(&mut self, setup: &mut SetupContext<'_>) -> Result<()> {
        setup_all(&mut self.children, setup)
    }

    fn begin(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
        self.index = 0;
    }

    fn execute(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Result<Status> {
        while self.index < self.children.len() {
            match self.children[self.index].tick(ctx, agent, world, blackboard)? {
                Status::Failure => self.index += 1,
                other => return Ok(other),
            }
        }

        Ok(Status::Failure)
    }

    fn on_abort(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        if let Some(child) = self.children.get_mut(self.index) {
            child.abort(ctx, agent, world, blackboard);
        }
    }
}

/// Shared bookkeeping for the reactive composites: which child is currently running.
struct Reactive<W>
where
    W: Host + 'static,
{
    children: Vec<Node<W>>,
    running: Option<usize>,
}

impl<W> Reactive<W>
where
    W: Host + 'static,
{
    /// Re-evaluate every child from the left. `pass` is the status that moves on to the next
    /// child; anything else settles this tick.
    fn execute(
        &mut self,
        pass: Status,
        exhausted: Status,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Result<Status> {
        for i in 0..self.children.len() {
            let status = self.children[i].tick(ctx, agent, world, blackboard)?;
            if status == pass {
                continue;
            }

            // A higher-priority child settled the tick; a lower one that was running is cut off.
            self.abort_running_except(i, ctx, agent, world, blackboard);
            self.running = status.is_running().then_some(i);
            return Ok(status);
        }

        self.running = None;
        Ok(exhausted)
    }

    fn abort_running_except(
        &mut self,
        keep: usize,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        if let Some(prev) = self.running.take() {
            if prev != keep {
                self.children[prev].abort(ctx, agent, world, blackboard);
            }
        }
    }

    fn abort(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        if let Some(prev) = self.running.take() {
            self.children[prev].abort(ctx, agent, world, blackboard);
        }
    }
}

/// Sequence that re-checks earlier children every tick.
///
/// If an earlier child stops succeeding while a later one is running, the running child is
/// aborted.
pub struct ReactiveSequence<W>
where
    W: Host + 'static,
{
    inner: Reactive<W>,
}

impl<W> ReactiveSequence<W>
where
    W: Host + 'static,
{
    pub fn new(children: Vec<Node<W>>) -> Self {
        Self {
            inner: Reactive {
                children,
                running: None,
            },
        }
    }
}

impl<W> Behavior<W> for ReactiveSequence<W>
where
    W: Host + 'static,
{
    fn name(&self) -> &str {
        "ReactiveSequence"
    }

    fn setup(&mut self, setup: &mut SetupContext<'_>) -> Result<()> {
        setup_all(&mut self.inner.children, setup)
    }

    fn begin(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
        self.inner.running = None;
    }

    fn execute(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Result<Status> {
        self.inner
            .execute(Status::Success, Status::Success, ctx, agent, world, blackboard)
    }

    fn on_abort(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        self.inner.abort(ctx, agent, world, blackboard);
    }
}

/// Priority selector: the first child that does not fail wins, every tick.
///
/// When a higher-priority child starts running or succeeds, a lower-priority child that was
/// running is aborted.
pub struct ReactiveSelector<W>
where
    W: Host + 'static,
{
    inner: Reactive<W>,
}

impl<W> ReactiveSelector<W>
where
    W: Host + 'static,
{
    pub fn new(children: Vec<Node<W>>) -> Self {
        Self {
            inner: Reactive {
                children,
                running: None,
            },
        }
    }
}

impl<W> Behavior<W> for ReactiveSelector<W>
where
    W: Host + 'static,
{
    fn name(&self) -> &str {
        "ReactiveSelector"
    }

    fn setup(&mut self, setup: &mut SetupContext<'_>) -> Result<()> {
        setup_all(&mut self.inner.children, setup)
    }

    fn begin(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
        self.inner.running = None;
    }

    fn execute(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Result<Status> {
        self.inner
            .execute(Status::Failure, Status::Failure, ctx, agent, world, blackboard)
    }

    fn on_abort(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        self.inner.abort(ctx, agent, world, blackboard);
    }
}
