#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use arbor_core::{Blackboard, Host, TickContext};

use crate::nodes::setup_all;
use crate::{Behavior, BtError, Node, Result, SetupContext, Status};

/// How many children must reach an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Threshold {
    All,
    AtLeast(usize),
}

impl Threshold {
    pub fn resolve(self, children: usize) -> usize {
        match self {
            Threshold::All => children,
            Threshold::AtLeast(n) => n,
        }
    }
}

/// When a [`Parallel`] reports its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParallelExit {
    /// Keep running until every child has finished, then compare the counts.
    #[default]
    WhenSettled,
    /// Report as soon as a threshold is met (or success became unreachable) and abort the
    /// children still running.
    OnThreshold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParallelPolicy {
    pub success: Threshold,
    pub failure: Threshold,
    #[cfg_attr(feature = "serde", serde(default))]
    pub exit: ParallelExit,
}

impl Default for ParallelPolicy {
    fn default() -> Self {
        Self {
            success: Threshold::All,
            failure: Threshold::AtLeast(1),
            exit: ParallelExit::WhenSettled,
        }
    }
}

impl ParallelPolicy {
    /// Succeed once `n` children succeeded; fail on the first failure.
    pub fn succeed_at(n: usize) -> Self {
        Self {
            success: Threshold::AtLeast(n),
            ..Self::default()
        }
    }

    pub fn with_exit(mut self, exit: ParallelExit) -> Self {
        self.exit = exit;
        self
    }
}

/// Ticks every unfinished child on every tick, in declaration order.
///
/// A child's result is kept for the rest of the run; finished children are not ticked again
/// until the parallel begins a new run. Any child `Error` ends the run immediately with `Error`.
/// Whenever the parallel stops early (verdict, error or abort) every child still active is
/// aborted.
pub struct Parallel<W>
where
    W: Host + 'static,
{
    children: Vec<Node<W>>,
    policy: ParallelPolicy,
    results: Vec<Option<Status>>,
}

impl<W> Parallel<W>
where
    W: Host + 'static,
{
    pub fn new(policy: ParallelPolicy, children: Vec<Node<W>>) -> Self {
        let results = vec![None; children.len()];
        Self {
            children,
            policy,
            results,
        }
    }

    fn verdict(&self) -> Option<Status> {
        let n = self.children.len();
        let need_success = self.policy.success.resolve(n);
        let need_failure = self.policy.failure.resolve(n);

        let succeeded = self
            .results
            .iter()
            .filter(|r| **r == Some(Status::Success))
            .count();
        let failed = self
            .results
            .iter()
            .filter(|r| **r == Some(Status::Failure))
            .count();
        let pending = n - succeeded - failed;

        match self.policy.exit {
            ParallelExit::WhenSettled => {
                if pending > 0 {
                    None
                } else if failed >= need_failure {
                    Some(Status::Failure)
                } else {
                    Some(Status::from(succeeded >= need_success))
                }
            }
            ParallelExit::OnThreshold => {
                if succeeded >= need_success {
                    Some(Status::Success)
                } else if failed >= need_failure || succeeded + pending < need_success {
                    Some(Status::Failure)
                } else {
                    None
                }
            }
        }
    }

    fn abort_active(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        for child in self.children.iter_mut() {
            child.abort(ctx, agent, world, blackboard);
        }
    }
}

impl<W> Behavior<W> for Parallel<W>
where
    W: Host + 'static,
{
    fn name(&self) -> &str {
        "Parallel"
    }

    fn setup(&mut self, setup: &mut SetupContext<'_>) -> Result<()> {
        let n = self.children.len();
        let thresholds = [("success", self.policy.success), ("failure", self.policy.failure)];
        for (label, threshold) in thresholds {
            let needed = threshold.resolve(n);
            if needed == 0 || needed > n {
                return Err(BtError::InvalidConfig {
                    node: "Parallel".to_owned(),
                    reason: format!("{label} threshold {needed} with {n} children"),
                });
            }
        }

        setup_all(&mut self.children, setup)
    }

    fn begin(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
        self.results.iter_mut().for_each(|r| *r = None);
    }

    fn execute(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Result<Status> {
        for i in 0..self.children.len() {
            if self.results[i].is_some() {
                continue;
            }

            match self.children[i].tick(ctx, agent, world, blackboard)? {
                Status::Running => {}
                Status::Error => {
                    self.abort_active(ctx, agent, world, blackboard);
                    return Ok(Status::Error);
                }
                status => self.results[i] = Some(status),
            }
        }

        match self.verdict() {
            Some(status) => {
                self.abort_active(ctx, agent, world, blackboard);
                Ok(status)
            }
            None => Ok(Status::Running),
        }
    }

    fn on_abort(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        self.abort_active(ctx, agent, world, blackboard);
    }
}
