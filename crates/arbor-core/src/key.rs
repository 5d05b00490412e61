use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const FNV_OFFSET: u64 = 0xCBF2_9CE4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;

/// Stable FNV-1a hash of a property name.
pub const fn hash_name(name: &str) -> u64 {
    let bytes = name.as_bytes();
    let mut hash = FNV_OFFSET;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Identifier of a blackboard property.
///
/// Keys built from equal names are equal and hash identically no matter when or where they
/// were constructed, so they can be declared as `const` items next to the nodes that use them:
///
/// ```
/// use arbor_core::PropertyKey;
///
/// const TARGET: PropertyKey = PropertyKey::named("target");
/// assert_eq!(TARGET, PropertyKey::named(&String::from("target")));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropertyKey {
    id: u64,
}

impl PropertyKey {
    pub const fn named(name: &str) -> Self {
        Self {
            id: hash_name(name),
        }
    }

    /// Raw id, for hosts that allocate property ids themselves.
    pub const fn from_id(id: u64) -> Self {
        Self { id }
    }

    pub const fn id(self) -> u64 {
        self.id
    }
}

impl From<&str> for PropertyKey {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl fmt::Debug for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyKey({:#018x})", self.id)
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.id)
    }
}
