//! # Innate Primitives
//!
//! Hardcoded constants for the arcana correspondence graph.
//!
//! These are compiled into the binary and immutable at runtime.

/// Number of primary (sphere) nodes in the canonical schema.
///
/// Also the fixed offset applied to a path's sequence number for its
/// secondary number correspondence: path `n` links to `Number(n)` and
/// `Number(n + SPHERE_COUNT)`.
pub const SPHERE_COUNT: u8 = 10;

/// Maximum traversal depth for graph walks.
///
/// All queries must be computationally bounded; requested depths are
/// clamped to this value.
pub const MAX_WALK_DEPTH: usize = 100;

/// Reserved part key for a system's base loader.
///
/// `"base"` is always the first entry in the loaded-part order and cannot
/// be registered as an optional part.
pub const BASE_PART: &str = "base";
