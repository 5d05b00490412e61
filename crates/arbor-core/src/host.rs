use core::fmt::Debug;

/// Identifies the agent a tree drives in logs and trace output.
///
/// Ticking must not depend on anything but this value, so two trees driving agents with equal
/// ids behave identically given the same blackboard and host state.
pub trait AgentId: Copy + Ord + Debug {
    fn stable_id(self) -> u64;
}

impl AgentId for u64 {
    fn stable_id(self) -> u64 {
        self
    }
}

/// The embedding host a tree runs against.
///
/// Nodes receive it mutably on every hook and own none of it: game objects, nav-mesh agents and
/// animators all live on the host side. Leaf crates add extension traits for the engine calls
/// they wrap; the core only needs to know how agents are named.
pub trait Host {
    type Agent: AgentId;
}
