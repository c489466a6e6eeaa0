//! # Core Type Definitions
//!
//! This module contains all core types for the arcana correspondence graph:
//! - Node identity (`NodeKind`, `NodeId`)
//! - Typed node payloads (`Payload`)
//! - The node record itself (`Node`)
//! - Error types (`ArcanaError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Carry no floating-point data (the ephemeris boundary types live in
//!   `crate::ephemeris` and never enter the graph)

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// NODE KIND
// =============================================================================

/// The closed set of symbolic categories a node may belong to.
///
/// Every node has exactly one kind, and the kind is part of its identity.
/// Matching on `NodeKind` is exhaustive; adding a category is a deliberate,
/// compiler-checked change rather than a new magic string.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum NodeKind {
    /// A numbered primary entity (e.g. a sephira on the Tree of Life).
    Sphere,
    /// A dual-numbered connection between two spheres.
    Path,
    /// A shared numeric anchor node.
    Number,
    /// A letter with an associated numeric value.
    Letter,
    /// A color attribution.
    Color,
    /// A zodiacal sign.
    Sign,
    /// A classical element.
    Element,
    /// A divination card.
    Card,
    /// A card suit.
    Suit,
}

impl NodeKind {
    /// Stable lowercase tag, used for display and diagnostics only.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::Path => "path",
            Self::Number => "number",
            Self::Letter => "letter",
            Self::Color => "color",
            Self::Sign => "sign",
            Self::Element => "element",
            Self::Card => "card",
            Self::Suit => "suit",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// NODE ID
// =============================================================================

/// Structural tagged identifier for a node.
///
/// An id is a kind discriminant paired with a canonical value string.
/// Two ids are equal exactly when both components are equal, so equal
/// symbolic facts always collide on the same node. The per-kind
/// constructors below produce canonical values; prefer them over
/// `NodeId::new` so callers cannot disagree on formatting.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct NodeId {
    /// The symbolic category this id belongs to.
    pub kind: NodeKind,
    /// The canonical value within that category.
    pub value: String,
}

impl NodeId {
    /// Create an id from a kind and a raw value.
    #[must_use]
    pub fn new(kind: NodeKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Id of the numbered sphere `number`.
    #[must_use]
    pub fn sphere(number: u8) -> Self {
        Self::new(NodeKind::Sphere, number.to_string())
    }

    /// Id of the path with sequence number `number`.
    #[must_use]
    pub fn path(number: u8) -> Self {
        Self::new(NodeKind::Path, number.to_string())
    }

    /// Id of the shared number node for `value`.
    #[must_use]
    pub fn number(value: i64) -> Self {
        Self::new(NodeKind::Number, value.to_string())
    }

    /// Id of the letter node for `glyph`.
    #[must_use]
    pub fn letter(glyph: char) -> Self {
        Self::new(NodeKind::Letter, glyph.to_string())
    }

    /// Id of the color node named `name`.
    #[must_use]
    pub fn color(name: &str) -> Self {
        Self::new(NodeKind::Color, name)
    }

    /// Id of the sign node named `name`.
    #[must_use]
    pub fn sign(name: &str) -> Self {
        Self::new(NodeKind::Sign, name)
    }

    /// Id of the element node named `name`.
    #[must_use]
    pub fn element(name: &str) -> Self {
        Self::new(NodeKind::Element, name)
    }

    /// Id of the card node titled `title`.
    #[must_use]
    pub fn card(title: &str) -> Self {
        Self::new(NodeKind::Card, title)
    }

    /// Id of the suit node named `name`.
    #[must_use]
    pub fn suit(name: &str) -> Self {
        Self::new(NodeKind::Suit, name)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}

// =============================================================================
// PAYLOAD
// =============================================================================

/// Typed node payload.
///
/// The shape of a node's data is determined by its kind; this is a closed
/// tagged union rather than a generic bag of fields, so every consumer
/// matches exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    /// Sphere payload: its sequence number.
    Sphere { number: u8 },
    /// Path payload: its sequence number and the two sphere numbers it joins.
    Path { number: u8, between: (u8, u8) },
    /// Shared number anchor.
    Number { value: i64 },
    /// Letter with its numeric value.
    Letter { glyph: char, value: i64 },
    /// Color attribution.
    Color { name: String },
    /// Zodiacal sign.
    Sign { name: String },
    /// Classical element.
    Element { name: String },
    /// Divination card.
    Card { title: String },
    /// Card suit.
    Suit { name: String },
}

impl Payload {
    /// The node kind this payload shape belongs to.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Sphere { .. } => NodeKind::Sphere,
            Self::Path { .. } => NodeKind::Path,
            Self::Number { .. } => NodeKind::Number,
            Self::Letter { .. } => NodeKind::Letter,
            Self::Color { .. } => NodeKind::Color,
            Self::Sign { .. } => NodeKind::Sign,
            Self::Element { .. } => NodeKind::Element,
            Self::Card { .. } => NodeKind::Card,
            Self::Suit { .. } => NodeKind::Suit,
        }
    }
}

// =============================================================================
// NODE
// =============================================================================

/// A node in the correspondence graph.
///
/// Carries an optional display name distinct from its id, and an optional
/// payload whose shape matches its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// The structural tagged identifier.
    pub id: NodeId,
    /// Optional human-facing name.
    pub name: Option<String>,
    /// Optional typed payload.
    pub payload: Option<Payload>,
}

impl Node {
    /// Create a bare node with neither name nor payload.
    #[must_use]
    pub const fn new(id: NodeId) -> Self {
        Self {
            id,
            name: None,
            payload: None,
        }
    }

    /// Attach a display name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a payload.
    #[must_use]
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// A shared number node for `value`.
    #[must_use]
    pub fn number(value: i64) -> Self {
        Self::new(NodeId::number(value)).with_payload(Payload::Number { value })
    }

    /// A letter node carrying its numeric value.
    #[must_use]
    pub fn letter(glyph: char, value: i64) -> Self {
        Self::new(NodeId::letter(glyph)).with_payload(Payload::Letter { glyph, value })
    }

    /// A color node.
    #[must_use]
    pub fn color(name: &str) -> Self {
        Self::new(NodeId::color(name)).with_payload(Payload::Color { name: name.to_string() })
    }

    /// A sign node.
    #[must_use]
    pub fn sign(name: &str) -> Self {
        Self::new(NodeId::sign(name)).with_payload(Payload::Sign { name: name.to_string() })
    }

    /// An element node.
    #[must_use]
    pub fn element(name: &str) -> Self {
        Self::new(NodeId::element(name)).with_payload(Payload::Element { name: name.to_string() })
    }

    /// A card node.
    #[must_use]
    pub fn card(title: &str) -> Self {
        Self::new(NodeId::card(title)).with_payload(Payload::Card { title: title.to_string() })
    }

    /// A suit node.
    #[must_use]
    pub fn suit(name: &str) -> Self {
        Self::new(NodeId::suit(name)).with_payload(Payload::Suit { name: name.to_string() })
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors surfaced by the graph store and the module manager.
///
/// - Reads on unknown ids degrade to empty results and never produce these
/// - Writes that require existing endpoints fail loudly with `UnknownNode`
/// - Orchestration errors are explicit and named
/// - No operation retries; every failure is a single-attempt hard failure
#[derive(Debug, Error)]
pub enum ArcanaError {
    /// A write referenced a node id that is not in the graph.
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    /// A part-load or bridge-run was attempted with no active system.
    #[error("no active system: load a system first")]
    NoActiveSystem,

    /// The requested system key is not in the registry.
    #[error("system not found: {0}")]
    SystemNotFound(String),

    /// The requested part key is not in the active system.
    #[error("part not found: {0}")]
    PartNotFound(String),

    /// The requested bridge id is not in the active system.
    #[error("bridge not found: {0}")]
    BridgeNotFound(String),

    /// A registry descriptor failed eager validation at construction.
    #[error("invalid registry: {0}")]
    InvalidRegistry(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_ids_collide() {
        assert_eq!(NodeId::sphere(1), NodeId::sphere(1));
        assert_ne!(NodeId::sphere(1), NodeId::path(1));
        assert_ne!(NodeId::number(1), NodeId::number(11));
    }

    #[test]
    fn id_display_embeds_kind() {
        assert_eq!(NodeId::sphere(1).to_string(), "sphere:1");
        assert_eq!(NodeId::letter('A').to_string(), "letter:A");
    }

    #[test]
    fn payload_kind_matches_constructor() {
        assert_eq!(Node::number(3).payload.map(|p| p.kind()), Some(NodeKind::Number));
        assert_eq!(Node::suit("Wands").payload.map(|p| p.kind()), Some(NodeKind::Suit));
    }

    #[test]
    fn ids_order_deterministically() {
        let mut ids = vec![NodeId::number(2), NodeId::sphere(1), NodeId::number(1)];
        ids.sort();
        // Ordered by kind discriminant first, then by value
        assert_eq!(
            ids,
            vec![NodeId::sphere(1), NodeId::number(1), NodeId::number(2)]
        );
    }
}
