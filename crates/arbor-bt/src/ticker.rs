#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use arbor_core::{AgentId, Blackboard, Host, TickContext};
use arbor_tools::{emit as trace_emit, TraceEvent};

use crate::{Node, Result, SetupContext, Status};

/// What the ticker does after the root finished a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CompletionPolicy {
    /// Begin a fresh run on the next tick.
    #[default]
    Restart,
    /// Keep reporting the final status without ticking the tree again.
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TickerConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_complete: CompletionPolicy,
}

/// Owns one tree instance: the root node, its blackboard, and the agent it drives.
///
/// The host calls [`Ticker::tick`] once per step and [`Ticker::abort`] when the tree must stop
/// early (for example because the agent is being destroyed).
pub struct Ticker<W>
where
    W: Host + 'static,
{
    pub agent: W::Agent,
    pub config: TickerConfig,
    pub blackboard: Blackboard,
    root: Node<W>,
    node_count: usize,
    last: Option<Status>,
    runs: u64,
    halted: bool,
}

impl<W> Ticker<W>
where
    W: Host + 'static,
{
    /// Set up the whole tree. Fails if any node rejects its configuration.
    pub fn new(agent: W::Agent, root: Node<W>) -> Result<Self> {
        Self::with_blackboard(agent, root, Blackboard::new())
    }

    /// Like [`Ticker::new`], with a blackboard the host has already seeded.
    pub fn with_blackboard(
        agent: W::Agent,
        mut root: Node<W>,
        mut blackboard: Blackboard,
    ) -> Result<Self> {
        let node_count = {
            let mut setup = SetupContext::new(&mut blackboard);
            root.setup(&mut setup)?;
            setup.node_count()
        };
        tracing::debug!(
            agent = agent.stable_id(),
            root = root.name(),
            node_count,
            "tree set up"
        );

        Ok(Self {
            agent,
            config: TickerConfig::default(),
            blackboard,
            root,
            node_count,
            last: None,
            runs: 0,
            halted: false,
        })
    }

    pub fn with_config(mut self, config: TickerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn root(&self) -> &Node<W> {
        &self.root
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn last_status(&self) -> Option<Status> {
        self.last
    }

    /// Number of root runs begun so far.
    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn is_active(&self) -> bool {
        self.root.is_active()
    }

    /// Finished under [`CompletionPolicy::Stop`]; ticks no longer reach the tree.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Advance the tree by one step.
    ///
    /// `Failure` and `Error` at the root are returned as-is; what they mean for the agent is up
    /// to the host.
    pub fn tick(&mut self, ctx: &TickContext, world: &mut W) -> Result<Status> {
        if self.halted {
            if let Some(last) = self.last {
                return Ok(last);
            }
        }

        let starting = !self.root.is_active();
        let status = self
            .root
            .tick(ctx, self.agent, world, &mut self.blackboard)?;

        // Only a first tick that got through without a contract violation counts as a run.
        if starting {
            self.runs += 1;
            tracing::debug!(
                agent = self.agent.stable_id(),
                run = self.runs,
                tick = ctx.tick,
                "run began"
            );
            trace_emit(
                &self.blackboard,
                TraceEvent::new(ctx.tick, "bt.tree.run").with_a(self.runs),
            );
        }
        self.last = Some(status);

        if status.is_terminal() {
            tracing::debug!(
                agent = self.agent.stable_id(),
                run = self.runs,
                ?status,
                "run finished"
            );
            self.halted = self.config.on_complete == CompletionPolicy::Stop;
        }

        Ok(status)
    }

    /// Abort the active path, depth first, before returning. Returns whether anything was
    /// running. The next tick begins a fresh run.
    pub fn abort(&mut self, ctx: &TickContext, world: &mut W) -> bool {
        if !self.root.is_active() {
            return false;
        }

        tracing::debug!(
            agent = self.agent.stable_id(),
            run = self.runs,
            tick = ctx.tick,
            "run aborted"
        );
        self.root.abort(ctx, self.agent, world, &mut self.blackboard);
        trace_emit(
            &self.blackboard,
            TraceEvent::new(ctx.tick, "bt.tree.abort").with_a(self.runs),
        );
        true
    }

    /// Leave the halted state so the next tick begins a new run.
    pub fn resume(&mut self) {
        self.halted = false;
    }
}
