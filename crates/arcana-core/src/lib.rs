//! # arcana-core
//!
//! A typed, in-memory correspondence graph for interlinked symbolic
//! entities, plus the orchestration layer that loads, unloads, and swaps
//! between rule-sets built on top of it.
//!
//! ## Architectural Constraints
//!
//! - Pure Rust: no async, no I/O, no network dependencies
//! - Deterministic: `BTreeMap`/`BTreeSet` keyed storage; adjacency lists
//!   preserve insertion order because neighbor enumeration is ordered
//! - Single logical caller: no operation is internally synchronized
//! - No silent failures: writes that need existing endpoints fail loudly,
//!   while reads on unknown ids degrade to empty results
//!
//! ## Layers
//!
//! - [`graph`]: the node/adjacency store and its primitives
//! - [`builder`]: typed conventions encoding the sphere/path schema
//! - [`registry`] + [`manager`]: rule-set catalog and the state machine
//!   over `(active system, loaded parts, bridged parts)`
//! - [`ephemeris`] + [`numerology`]: external-collaborator boundaries

// =============================================================================
// MODULES
// =============================================================================

pub mod builder;
pub mod ephemeris;
pub mod graph;
pub mod manager;
pub mod numerology;
pub mod primitives;
pub mod registry;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{ArcanaError, Node, NodeId, NodeKind, Payload};

// =============================================================================
// RE-EXPORTS: Graph Engine & Conventions
// =============================================================================

pub use builder::Builder;
pub use graph::Graph;

// =============================================================================
// RE-EXPORTS: Orchestration
// =============================================================================

pub use manager::{BridgeOutcome, ModuleManager};
pub use registry::{Bridge, Part, Registry, System};

// =============================================================================
// RE-EXPORTS: Collaborator Boundaries
// =============================================================================

pub use ephemeris::{
    BodyPosition, CelestialBody, Chart, ChartMoment, Ephemeris, EphemerisError, HouseSystem,
    Houses,
};
