//! Hashing utilities for determinism checks.
//!
//! Uses FNV-1a for fast, deterministic hashing of world state. These
//! hashes are not cryptographically secure; they let two runs be
//! compared one `u64` per tick.

use outbreak_core::Node;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Hash the per-node state vector.
///
/// Folds in the node count first, then each node's state code in id
/// order. Positions and categories are ignored; see [`layout_hash`].
pub fn state_hash(nodes: &[Node]) -> u64 {
    let mut hash = fnv1a_u64(FNV_OFFSET, nodes.len() as u64);
    for node in nodes {
        hash = fnv1a_byte(hash, node.state.code());
    }
    hash
}

/// Hash the placement result: every node's position bits and category.
pub fn layout_hash(nodes: &[Node]) -> u64 {
    let mut hash = fnv1a_u64(FNV_OFFSET, nodes.len() as u64);
    for node in nodes {
        hash = fnv1a_u64(hash, node.position.x.to_bits());
        hash = fnv1a_u64(hash, node.position.y.to_bits());
        hash = fnv1a_byte(hash, node.category as u8);
    }
    hash
}
