//! Cooperative ownership of shared external resources.
//!
//! Several nodes may, one after another or side by side, drive the same stateful resource (a
//! nav-mesh agent's path is the usual example). Each node that takes control bumps an epoch
//! stored in the blackboard value channel and remembers the new value. When it finishes or is
//! aborted it may only tear the resource down if the epoch still carries its value; otherwise a
//! newer controller has taken over and the resource must be left alone.

use crate::{Blackboard, PropertyKey};

/// Agreed slot for whoever currently drives the agent's navigation path.
pub const MOVEMENT_HOLDER: HolderSlot =
    HolderSlot::new(PropertyKey::named("arbor.movement_holder"));

/// Location of a holder epoch in the blackboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HolderSlot {
    key: PropertyKey,
}

impl HolderSlot {
    pub const fn new(key: PropertyKey) -> Self {
        Self { key }
    }

    pub const fn key(self) -> PropertyKey {
        self.key
    }

    /// Current epoch; `0` until the first acquisition.
    pub fn current(self, blackboard: &Blackboard) -> u64 {
        blackboard.try_get_value::<u64>(self.key).unwrap_or(0)
    }

    /// Become the latest controller of the resource.
    pub fn acquire(self, blackboard: &mut Blackboard) -> HolderToken {
        let epoch = self.current(blackboard).wrapping_add(1);
        blackboard.set_value(self.key, epoch);
        tracing::trace!(slot = %self.key, epoch, "holder acquired");
        HolderToken { slot: self, epoch }
    }
}

/// Epoch captured by one controller at acquisition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HolderToken {
    slot: HolderSlot,
    epoch: u64,
}

/// Result of [`HolderToken::release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// The token was still current and the cleanup ran.
    Released,
    /// A newer controller owns the resource; the cleanup was skipped.
    Superseded { current: u64 },
}

impl HolderToken {
    pub fn epoch(self) -> u64 {
        self.epoch
    }

    pub fn slot(self) -> HolderSlot {
        self.slot
    }

    pub fn is_current(self, blackboard: &Blackboard) -> bool {
        self.slot.current(blackboard) == self.epoch
    }

    /// Run `cleanup` only if no other controller acquired the slot since this token was issued.
    ///
    /// A superseded token changes nothing: the epoch stays with the newer controller and none of
    /// the stale controller's earlier blackboard writes are rolled back.
    pub fn release(self, blackboard: &Blackboard, cleanup: impl FnOnce()) -> Release {
        let current = self.slot.current(blackboard);
        if current != self.epoch {
            tracing::debug!(
                slot = %self.slot.key,
                epoch = self.epoch,
                current,
                "holder superseded; skipping cleanup"
            );
            return Release::Superseded { current };
        }

        cleanup();
        Release::Released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: HolderSlot = HolderSlot::new(PropertyKey::named("path_holder"));

    #[test]
    fn acquire_bumps_epoch() {
        let mut bb = Blackboard::new();
        assert_eq!(PATH.current(&bb), 0);

        let a = PATH.acquire(&mut bb);
        let b = PATH.acquire(&mut bb);

        assert_eq!(a.epoch(), 1);
        assert_eq!(b.epoch(), 2);
        assert_eq!(PATH.current(&bb), 2);
        assert!(!a.is_current(&bb));
        assert!(b.is_current(&bb));
    }

    #[test]
    fn release_runs_cleanup_once_when_current() {
        let mut bb = Blackboard::new();
        let token = PATH.acquire(&mut bb);
        let mut cleaned = 0;

        assert_eq!(token.release(&bb, || cleaned += 1), Release::Released);
        assert_eq!(cleaned, 1);
    }

    #[test]
    fn slots_are_independent() {
        let other = HolderSlot::new(PropertyKey::named("animator_holder"));
        let mut bb = Blackboard::new();
        let token = PATH.acquire(&mut bb);
        other.acquire(&mut bb);

        assert!(token.is_current(&bb));
    }
}
