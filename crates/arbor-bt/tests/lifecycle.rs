mod common;

use arbor_bt::{
    Behavior, BtError, Invert, Node, NodeId, NodePhase, Parallel, ParallelPolicy, Result,
    Sequence, SetupContext, Status, Ticker,
};
use arbor_core::{Blackboard, TickContext};

use common::{count, ctx, entries_for, new_log, probe, TestWorld};

use Status::{Failure, Running, Success};

#[test]
fn ticking_before_setup_is_a_contract_violation() {
    let log = new_log();
    let mut node = probe("a", &[Success], &log);
    let mut bb = Blackboard::new();

    let err = node
        .tick(&ctx(0), 1, &mut TestWorld, &mut bb)
        .unwrap_err();

    assert_eq!(err, BtError::NotSetUp { node: "a".into() });
    assert!(log.borrow().is_empty());
    assert_eq!(node.phase(), NodePhase::Unconfigured);
}

#[test]
fn setting_up_twice_is_a_contract_violation() {
    let log = new_log();
    let mut node = probe("a", &[Success], &log).with_label("patrol");
    let mut bb = Blackboard::new();

    node.setup(&mut SetupContext::new(&mut bb)).unwrap();
    let err = node.setup(&mut SetupContext::new(&mut bb)).unwrap_err();

    assert_eq!(
        err,
        BtError::AlreadySetUp {
            node: "patrol".into()
        }
    );
}

#[test]
fn natural_completion_calls_end_exactly_once() {
    let log = new_log();
    let mut ticker = Ticker::new(1, probe("a", &[Running, Running, Success], &log)).unwrap();
    let mut world = TestWorld;

    assert_eq!(ticker.tick(&ctx(0), &mut world), Ok(Running));
    assert!(ticker.is_active());
    assert_eq!(ticker.tick(&ctx(1), &mut world), Ok(Running));
    assert_eq!(ticker.root().last_status(), Some(Running));
    assert_eq!(ticker.tick(&ctx(2), &mut world), Ok(Success));
    assert!(!ticker.is_active());
    assert_eq!(ticker.root().last_status(), Some(Success));

    assert_eq!(
        entries_for(&log, "a"),
        vec![
            "a:begin",
            "a:execute",
            "a:execute",
            "a:execute",
            "a:end:Success"
        ]
    );
}

#[test]
fn abort_replaces_end_for_the_run() {
    let log = new_log();
    let mut ticker = Ticker::new(1, probe("a", &[Running], &log)).unwrap();
    let mut world = TestWorld;

    ticker.tick(&ctx(0), &mut world).unwrap();
    assert!(ticker.abort(&ctx(1), &mut world));
    assert!(!ticker.abort(&ctx(2), &mut world));

    assert_eq!(count(&log, "a:abort"), 1);
    assert!(entries_for(&log, "a").iter().all(|e| !e.starts_with("a:end")));
    assert_eq!(ticker.root().phase(), NodePhase::Idle);
}

#[test]
fn begin_is_not_repeated_within_a_run() {
    let log = new_log();
    let script = [Running, Running, Failure, Success];
    let mut ticker = Ticker::new(1, probe("a", &script, &log)).unwrap();
    let mut world = TestWorld;

    for tick in 0..4 {
        ticker.tick(&ctx(tick), &mut world).unwrap();
    }

    // Run 1 spans three ticks, run 2 finishes in one.
    assert_eq!(count(&log, "a:begin"), 2);
    assert_eq!(count(&log, "a:end:Failure"), 1);
    assert_eq!(count(&log, "a:end:Success"), 1);
    assert_eq!(ticker.runs(), 2);
}

#[test]
fn setup_assigns_depth_first_ids() {
    let log = new_log();
    let root = Node::new(Sequence::new(vec![
        probe("a", &[Success], &log),
        Node::new(Invert::new(probe("b", &[Failure], &log))),
    ]));

    let ticker = Ticker::new(1, root).unwrap();

    assert_eq!(ticker.node_count(), 4);
    assert_eq!(ticker.root().id(), Some(NodeId(0)));
    assert_eq!(ticker.root().name(), "Sequence");
}

#[test]
fn invalid_configuration_is_rejected_at_setup() {
    let log = new_log();
    let root = Node::new(Parallel::new(
        ParallelPolicy::succeed_at(4),
        vec![
            probe("a", &[Success], &log),
            probe("b", &[Success], &log),
            probe("c", &[Success], &log),
        ],
    ));

    let err = Ticker::new(1, root).err().expect("setup must fail");
    assert!(matches!(err, BtError::InvalidConfig { .. }));
    assert_eq!(
        err.to_string(),
        "invalid configuration for `Parallel`: success threshold 4 with 3 children"
    );
}

/// Decorator that forgets to forward `setup` to its child.
struct Forgetful {
    child: Node<TestWorld>,
}

impl Behavior<TestWorld> for Forgetful {
    fn execute(
        &mut self,
        ctx: &TickContext,
        agent: u64,
        world: &mut TestWorld,
        blackboard: &mut Blackboard,
    ) -> Result<Status> {
        self.child.tick(ctx, agent, world, blackboard)
    }
}

#[test]
fn contract_violations_surface_through_the_ticker() {
    let log = new_log();
    let root = Node::new(Forgetful {
        child: probe("b", &[Success], &log),
    });
    let mut ticker = Ticker::new(1, root).unwrap();

    let err = ticker.tick(&ctx(0), &mut TestWorld).unwrap_err();

    assert_eq!(err, BtError::NotSetUp { node: "b".into() });
    assert!(log.borrow().is_empty());

    // The failed tick neither leaves the tree running nor counts as a run.
    assert!(!ticker.is_active());
    assert_eq!(ticker.root().phase(), NodePhase::Idle);
    assert_eq!(ticker.runs(), 0);
}

#[test]
fn contract_violation_aborts_running_siblings() {
    let log = new_log();
    let root = Node::new(Parallel::new(
        ParallelPolicy::default(),
        vec![
            probe("a", &[Running], &log),
            Node::new(Forgetful {
                child: probe("b", &[Success], &log),
            }),
        ],
    ));
    let mut ticker = Ticker::new(1, root).unwrap();

    assert!(ticker.tick(&ctx(0), &mut TestWorld).is_err());

    assert_eq!(entries_for(&log, "a"), vec!["a:begin", "a:execute", "a:abort"]);
    assert!(!ticker.is_active());
}
