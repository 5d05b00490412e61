#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

use arbor_core::{Blackboard, PropertyKey};

/// A small, allocation-friendly trace event.
///
/// Plain data so it can be recorded during simulation and rendered later by tooling. `a` and `b`
/// carry tag-specific payloads (node id, status code, epoch).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub tag: Cow<'static, str>,
    pub a: u64,
    pub b: u64,
}

impl TraceEvent {
    pub fn new(tick: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            tag: tag.into(),
            a: 0,
            b: 0,
        }
    }

    pub fn with_a(mut self, a: u64) -> Self {
        self.a = a;
        self
    }

    pub fn with_b(mut self, b: u64) -> Self {
        self.b = b;
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

/// Sink that appends into a buffer shared with the host.
///
/// Clones share the buffer, so the host keeps one clone to read back what a registered sink
/// recorded.
#[derive(Debug, Clone, Default)]
pub struct VecTraceSink {
    events: Rc<RefCell<Vec<TraceEvent>>>,
}

impl VecTraceSink {
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Take every event recorded so far, leaving the buffer empty.
    pub fn drain(&self) -> Vec<TraceEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    /// Events carrying `tag`, in emission order.
    pub fn tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |e| e.tag == tag)
    }
}

/// Host-owned log, registered in the blackboard reference channel under [`TRACE_LOG`].
pub type SharedTraceLog = RefCell<TraceLog>;
/// Host-owned sink, registered in the blackboard reference channel under [`TRACE_SINK`].
pub type SharedTraceSink = RefCell<Box<dyn TraceSink>>;

/// Reference-channel key for collecting events in memory.
pub const TRACE_LOG: PropertyKey = PropertyKey::named("arbor.trace.log");
/// Reference-channel key for streaming events into a user-provided sink.
pub const TRACE_SINK: PropertyKey = PropertyKey::named("arbor.trace.sink");

impl TraceLog {
    /// Create a log and register it with `blackboard`. The caller keeps the only strong handle.
    pub fn attach(blackboard: &mut Blackboard) -> Rc<SharedTraceLog> {
        let log = Rc::new(RefCell::new(TraceLog::default()));
        blackboard.set_ref(TRACE_LOG, &log);
        log
    }
}

/// Register `sink` with `blackboard`. The caller keeps the only strong handle; dropping it
/// detaches the sink.
pub fn attach_sink(
    blackboard: &mut Blackboard,
    sink: impl TraceSink + 'static,
) -> Rc<SharedTraceSink> {
    let sink: Box<dyn TraceSink> = Box::new(sink);
    let shared = Rc::new(RefCell::new(sink));
    blackboard.set_ref(TRACE_SINK, &shared);
    shared
}

pub fn emit(blackboard: &Blackboard, event: TraceEvent) {
    if let Some(log) = blackboard.try_get_ref::<SharedTraceLog>(TRACE_LOG) {
        log.borrow_mut().push(event.clone());
    }
    if let Some(sink) = blackboard.try_get_ref::<SharedTraceSink>(TRACE_SINK) {
        sink.borrow_mut().emit(event);
    }
}
