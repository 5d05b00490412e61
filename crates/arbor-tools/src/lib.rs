//! Tooling primitives for the arbor behavior-tree runtime.
//!
//! Engine-agnostic and lightweight; inspectors and debug drawing belong in adapter crates.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{
    attach_sink, emit, SharedTraceLog, SharedTraceSink, TraceEvent, TraceLog, TraceSink,
    VecTraceSink, TRACE_LOG, TRACE_SINK,
};
