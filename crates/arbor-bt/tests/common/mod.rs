#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use arbor_bt::{Behavior, Node, Result, Status};
use arbor_core::{Blackboard, Host, TickContext};

#[derive(Debug, Default)]
pub struct TestWorld;

impl Host for TestWorld {
    type Agent = u64;
}

pub type Log = Rc<RefCell<Vec<String>>>;

pub fn new_log() -> Log {
    Rc::default()
}

pub fn ctx(tick: u64) -> TickContext {
    TickContext::new(tick, 0.1)
}

/// Leaf that replays a script of statuses (the last entry repeats) and records every hook.
pub struct Probe {
    name: &'static str,
    script: Vec<Status>,
    calls: usize,
    log: Log,
}

impl Behavior<TestWorld> for Probe {
    fn name(&self) -> &str {
        self.name
    }

    fn begin(
        &mut self,
        _ctx: &TickContext,
        _agent: u64,
        _world: &mut TestWorld,
        _bb: &mut Blackboard,
    ) {
        self.log.borrow_mut().push(format!("{}:begin", self.name));
    }

    fn execute(
        &mut self,
        _ctx: &TickContext,
        _agent: u64,
        _world: &mut TestWorld,
        _bb: &mut Blackboard,
    ) -> Result<Status> {
        self.log.borrow_mut().push(format!("{}:execute", self.name));
        let status = self.script[self.calls.min(self.script.len() - 1)];
        self.calls += 1;
        Ok(status)
    }

    fn end(
        &mut self,
        _ctx: &TickContext,
        _agent: u64,
        _world: &mut TestWorld,
        _bb: &mut Blackboard,
        status: Status,
    ) {
        self.log.borrow_mut().push(format!("{}:end:{:?}", self.name, status));
    }

    fn on_abort(
        &mut self,
        _ctx: &TickContext,
        _agent: u64,
        _world: &mut TestWorld,
        _bb: &mut Blackboard,
    ) {
        self.log.borrow_mut().push(format!("{}:abort", self.name));
    }
}

pub fn probe(name: &'static str, script: &[Status], log: &Log) -> Node<TestWorld> {
    assert!(!script.is_empty(), "probe needs at least one status");
    Node::new(Probe {
        name,
        script: script.to_vec(),
        calls: 0,
        log: log.clone(),
    })
}

pub fn count(log: &Log, entry: &str) -> usize {
    log.borrow().iter().filter(|e| *e == entry).count()
}

pub fn entries_for(log: &Log, name: &str) -> Vec<String> {
    let prefix = format!("{name}:");
    log.borrow()
        .iter()
        .filter(|e| e.starts_with(&prefix))
        .cloned()
        .collect()
}
