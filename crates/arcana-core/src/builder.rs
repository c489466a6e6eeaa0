//! # Builder Conventions
//!
//! Typed convenience layer over the graph primitives, encoding the canonical
//! symbolic schema: numbered spheres, dual-numbered connecting paths,
//! per-path letter sets, sign/element and card/suit associations.
//!
//! Primary-entity builders ([`Builder::sphere`], [`Builder::path`]) are
//! **idempotent** on their primary id: re-invoking with the same number
//! returns the existing id without modification. Secondary-correspondence
//! builders (letters, colors, signs) are **not** idempotent: invoking them
//! twice with different data accumulates links rather than replacing them.

use crate::graph::Graph;
use crate::primitives::SPHERE_COUNT;
use crate::{ArcanaError, Node, NodeId, Payload};

/// Stateless builder over a mutable graph, mirroring how loaders encode
/// a rule-set's content using only the store's primitives.
pub struct Builder;

impl Builder {
    /// Add the numbered sphere `number`, named `name`.
    ///
    /// Idempotent: if the sphere already exists, its id is returned
    /// unchanged. A new sphere is corresponded to the shared number node
    /// for its own number.
    pub fn sphere(graph: &mut Graph, number: u8, name: &str) -> Result<NodeId, ArcanaError> {
        let id = NodeId::sphere(number);
        if graph.contains(&id) {
            return Ok(id);
        }
        graph.add_node(
            Node::new(id.clone())
                .named(name)
                .with_payload(Payload::Sphere { number }),
        );
        graph.correspond(&id, Node::number(i64::from(number)))?;
        Ok(id)
    }

    /// Add the path `number` between the spheres `from` and `to`.
    ///
    /// Both sphere endpoints must already exist; a missing endpoint fails
    /// loudly with `UnknownNode`. Idempotent on the path id. A new path is
    /// linked to both endpoints and corresponded to two number nodes: its
    /// own sequence number, and that number offset by [`SPHERE_COUNT`].
    pub fn path(graph: &mut Graph, number: u8, from: u8, to: u8) -> Result<NodeId, ArcanaError> {
        let from_id = NodeId::sphere(from);
        let to_id = NodeId::sphere(to);
        // Check endpoints before inserting so a failure leaves no
        // half-built path behind
        if !graph.contains(&from_id) {
            return Err(ArcanaError::UnknownNode(from_id));
        }
        if !graph.contains(&to_id) {
            return Err(ArcanaError::UnknownNode(to_id));
        }

        let id = NodeId::path(number);
        if graph.contains(&id) {
            return Ok(id);
        }
        graph.add_node(Node::new(id.clone()).with_payload(Payload::Path {
            number,
            between: (from, to),
        }));
        graph.link(&id, &from_id)?;
        graph.link(&id, &to_id)?;
        graph.correspond(&id, Node::number(i64::from(number)))?;
        graph.correspond(&id, Node::number(i64::from(number) + i64::from(SPHERE_COUNT)))?;
        Ok(id)
    }

    /// Attach a letter (with its numeric value) to an existing node.
    ///
    /// Accumulates: attaching several letters to one path builds up its
    /// letter set. An already-known letter keeps its original value.
    pub fn attach_letter(
        graph: &mut Graph,
        id: &NodeId,
        glyph: char,
        value: i64,
    ) -> Result<NodeId, ArcanaError> {
        graph.correspond(id, Node::letter(glyph, value))
    }

    /// Attach a color attribution to an existing node.
    pub fn attach_color(graph: &mut Graph, id: &NodeId, name: &str) -> Result<NodeId, ArcanaError> {
        graph.correspond(id, Node::color(name))
    }

    /// Attach a zodiacal sign to an existing node.
    pub fn attach_sign(graph: &mut Graph, id: &NodeId, name: &str) -> Result<NodeId, ArcanaError> {
        graph.correspond(id, Node::sign(name))
    }

    /// Associate a sign with its classical element.
    ///
    /// The sign node must already exist (attach it first); the element node
    /// is created on demand and shared across signs.
    pub fn sign_element(
        graph: &mut Graph,
        sign: &str,
        element: &str,
    ) -> Result<NodeId, ArcanaError> {
        graph.correspond(&NodeId::sign(sign), Node::element(element))
    }

    /// Add a card and associate it with its suit.
    ///
    /// The card node is created if absent (never overwritten); the suit node
    /// is created on demand and shared across cards.
    pub fn card(graph: &mut Graph, title: &str, suit: &str) -> Result<NodeId, ArcanaError> {
        let card = Node::card(title);
        let card_id = card.id.clone();
        if !graph.contains(&card_id) {
            graph.add_node(card);
        }
        graph.correspond(&card_id, Node::suit(suit))?;
        Ok(card_id)
    }
}

// =============================================================================
// TESTS
// =============================================================================
