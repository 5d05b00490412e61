#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of one `execute` call.
///
/// `Success` and `Failure` are the natural ends of a run. `Error` also ends the run but means the
/// node could not even attempt its goal (typically missing blackboard data); composites pass it
/// up verbatim and stop. `Running` asks to be executed again on the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    Success,
    Failure,
    Running,
    Error,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        !self.is_running()
    }

    pub fn is_running(self) -> bool {
        self == Status::Running
    }

    /// Swap `Success` and `Failure`; `Running` and `Error` pass through.
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
            other => other,
        }
    }

    /// Numeric code used in trace payloads.
    pub fn code(self) -> u64 {
        match self {
            Status::Success => 0,
            Status::Failure => 1,
            Status::Running => 2,
            Status::Error => 3,
        }
    }
}

impl From<bool> for Status {
    fn from(value: bool) -> Self {
        if value {
            Status::Success
        } else {
            Status::Failure
        }
    }
}
