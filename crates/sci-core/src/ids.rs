// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Newtype identifiers shared across the workspace.

crate::define_id! {
    /// Opaque build identifier (`SCI_BUILD_UUID`). One per top-level build,
    /// shared by every session in its fan-out tree.
    pub struct BuildId("bld-");
}

crate::define_id! {
    /// One execution of a recipe, or a single async step, on one agent.
    pub struct SessionId("ses-");
}

/// Persistent identifier for an agent node, saved in `config.ini`.
///
/// Format is `A` followed by 40 hex characters, too long to fit
/// [`crate::id::IdBuf`]'s 23-byte cap, so this is a plain `String` newtype
/// rather than a [`crate::define_id!`] type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Generate a fresh random node id: `A` + 40 hex chars from a
    /// `SystemRandom`-seeded digest of random bytes.
    pub fn generate() -> Self {
        use rand::RngCore;
        use sha2::{Digest, Sha256};

        let mut bytes = [0u8; 20];
        rand::rng().fill_bytes(&mut bytes);
        let digest = Sha256::digest(bytes);
        let hex: String = digest.iter().take(20).map(|b| format!("{:02x}", b)).collect();
        Self(format!("A{hex}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
