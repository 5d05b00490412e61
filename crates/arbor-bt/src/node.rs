use std::borrow::Cow;
use std::fmt;

use arbor_core::{Blackboard, Host, TickContext};
use arbor_tools::{emit as trace_emit, TraceEvent};

use crate::{BtError, Result, Status};

/// Depth-first index assigned to a node during setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a node is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodePhase {
    /// Constructed but not yet set up; ticking is a contract violation.
    Unconfigured,
    Idle,
    /// Between `begin` and the matching `end` / `on_abort`.
    Active,
}

/// State handed to every node while a tree is being assembled.
pub struct SetupContext<'a> {
    blackboard: &'a mut Blackboard,
    next_id: u32,
}

impl<'a> SetupContext<'a> {
    pub fn new(blackboard: &'a mut Blackboard) -> Self {
        Self {
            blackboard,
            next_id: 0,
        }
    }

    /// The tree's blackboard, for seeding defaults a node relies on.
    pub fn blackboard(&mut self) -> &mut Blackboard {
        self.blackboard
    }

    /// Number of nodes set up so far.
    pub fn node_count(&self) -> usize {
        self.next_id as usize
    }

    fn alloc_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// The node contract.
///
/// Configuration is passed to the implementor's constructor; `setup` runs once when the tree is
/// assembled. A [`Node`] drives the remaining hooks in a fixed order:
///
/// - `begin` on the first tick of a run,
/// - `execute` on every tick of the run,
/// - `end` right after `execute` returned a terminal status,
/// - `on_abort` instead of `end` when the run is cut off while still running.
///
/// Implementors must not call these hooks on their children directly; they go through the
/// children's `Node` wrappers.
pub trait Behavior<W>: 'static
where
    W: Host + 'static,
{
    fn name(&self) -> &str {
        "Behavior"
    }

    /// Composites and decorators forward this to every child.
    fn setup(&mut self, _setup: &mut SetupContext<'_>) -> Result<()> {
        Ok(())
    }

    fn begin(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
    }

    fn execute(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Result<Status>;

    fn end(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
        _status: Status,
    ) {
    }

    fn on_abort(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
    }
}

/// Lifecycle wrapper around a [`Behavior`].
pub struct Node<W>
where
    W: Host + 'static,
{
    behavior: Box<dyn Behavior<W>>,
    label: Option<Cow<'static, str>>,
    id: Option<NodeId>,
    phase: NodePhase,
    last: Option<Status>,
}

impl<W> Node<W>
where
    W: Host + 'static,
{
    pub fn new(behavior: impl Behavior<W>) -> Self {
        Self::from_boxed(Box::new(behavior))
    }

    pub fn from_boxed(behavior: Box<dyn Behavior<W>>) -> Self {
        Self {
            behavior,
            label: None,
            id: None,
            phase: NodePhase::Unconfigured,
            last: None,
        }
    }

    /// Name this node in logs instead of its behavior's name.
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn name(&self) -> &str {
        match &self.label {
            Some(label) => label,
            None => self.behavior.name(),
        }
    }

    pub fn id(&self) -> Option<NodeId> {
        self.id
    }

    pub fn phase(&self) -> NodePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == NodePhase::Active
    }

    /// Status returned by the most recent tick.
    pub fn last_status(&self) -> Option<Status> {
        self.last
    }

    pub fn setup(&mut self, setup: &mut SetupContext<'_>) -> Result<()> {
        if self.phase != NodePhase::Unconfigured {
            return Err(BtError::AlreadySetUp {
                node: self.name().to_owned(),
            });
        }

        self.id = Some(setup.alloc_id());
        self.behavior.setup(setup)?;
        self.phase = NodePhase::Idle;
        Ok(())
    }

    pub fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Result<Status> {
        let id = match (self.phase, self.id) {
            (NodePhase::Unconfigured, _) | (_, None) => {
                return Err(BtError::NotSetUp {
                    node: self.name().to_owned(),
                })
            }
            (_, Some(id)) => id,
        };

        if self.phase == NodePhase::Idle {
            self.phase = NodePhase::Active;
            tracing::trace!(node = self.name(), id = %id, tick = ctx.tick, "begin");
            trace_emit(
                blackboard,
                TraceEvent::new(ctx.tick, "bt.node.begin").with_a(id.0 as u64),
            );
            self.behavior.begin(ctx, agent, world, blackboard);
        }

        let status = match self.behavior.execute(ctx, agent, world, blackboard) {
            Ok(status) => status,
            Err(err) => {
                // The run is over; still-active descendants get `on_abort` on the way out.
                tracing::debug!(node = self.name(), id = %id, %err, "run dropped on error");
                self.abort(ctx, agent, world, blackboard);
                return Err(err);
            }
        };
        self.last = Some(status);

        if status.is_terminal() {
            self.phase = NodePhase::Idle;
            self.behavior.end(ctx, agent, world, blackboard, status);
            tracing::trace!(node = self.name(), id = %id, ?status, "end");
            trace_emit(
                blackboard,
                TraceEvent::new(ctx.tick, "bt.node.end")
                    .with_a(id.0 as u64)
                    .with_b(status.code()),
            );
        }

        Ok(status)
    }

    /// Cut the current run short. Does nothing unless the node is active.
    pub fn abort(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        if self.phase != NodePhase::Active {
            return;
        }

        self.phase = NodePhase::Idle;
        self.behavior.on_abort(ctx, agent, world, blackboard);

        let id = self.id.map(|id| id.0 as u64).unwrap_or(u64::MAX);
        tracing::trace!(node = self.name(), id, tick = ctx.tick, "abort");
        trace_emit(blackboard, TraceEvent::new(ctx.tick, "bt.node.abort").with_a(id));
    }
}

impl<W> fmt::Debug for Node<W>
where
    W: Host + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name())
            .field("id", &self.id)
            .field("phase", &self.phase)
            .field("last", &self.last)
            .finish()
    }
}
