//! Stable template identifiers.
//!
//! Instances carry a hash of their template's name instead of a link to the
//! template, so they stay `Copy` and serialize as a single integer. The hash
//! must be identical across processes and builds, which rules out
//! `std::hash::DefaultHasher`.

use core::fmt;

use sha2::{Digest, Sha256};

/// Content hash of a skill or buff name (first 8 bytes of SHA-256, big endian).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillHash(pub u64);

impl SkillHash {
    pub fn of(name: &str) -> Self {
        let digest = Sha256::digest(name.as_bytes());
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest[..8]);
        Self(u64::from_be_bytes(prefix))
    }
}

impl From<&str> for SkillHash {
    fn from(name: &str) -> Self {
        Self::of(name)
    }
}

impl fmt::Display for SkillHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
