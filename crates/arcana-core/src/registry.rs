//! # System Registry
//!
//! Static catalog of available rule-sets.
//!
//! A registry is built once at startup, validated eagerly, and never mutated
//! afterwards. It is an explicit value handed to the module manager rather
//! than implicit global state.
//!
//! Loader/unloader pairing is expressed as the single [`Part`] trait, so a
//! part cannot exist with a loader but no unloader.

use crate::graph::Graph;
use crate::primitives::BASE_PART;
use crate::types::ArcanaError;
use std::collections::BTreeSet;
use std::fmt;

// =============================================================================
// PART TRAIT
// =============================================================================

/// One loadable/unloadable unit of a rule-set.
///
/// Implementations encode a fixed slice of symbolic content: `load` builds
/// nodes and links through the graph's primitives, `unload` removes exactly
/// what `load` created. Both base loaders and optional parts implement this.
pub trait Part {
    /// Build this part's content into the graph.
    fn load(&self, graph: &mut Graph) -> Result<(), ArcanaError>;

    /// Remove everything this part's `load` created.
    fn unload(&self, graph: &mut Graph) -> Result<(), ArcanaError>;
}

// =============================================================================
// BRIDGE
// =============================================================================

type BridgeFn = Box<dyn Fn(&mut Graph) -> Result<(), ArcanaError>>;

/// A one-time cross-part action.
///
/// A bridge fires only once all of its required part keys are loaded, and
/// at most once per system activation.
pub struct Bridge {
    id: String,
    requires: Vec<String>,
    action: BridgeFn,
}

impl Bridge {
    /// Create a bridge with its prerequisites and run action.
    pub fn new(
        id: impl Into<String>,
        requires: Vec<String>,
        action: impl Fn(&mut Graph) -> Result<(), ArcanaError> + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            requires,
            action: Box::new(action),
        }
    }

    /// The bridge's unique id within its system.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Part keys that must be loaded before this bridge may fire.
    #[must_use]
    pub fn requires(&self) -> &[String] {
        &self.requires
    }

    pub(crate) fn run(&self, graph: &mut Graph) -> Result<(), ArcanaError> {
        (self.action)(graph)
    }
}

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("id", &self.id)
            .field("requires", &self.requires)
            .finish()
    }
}

// =============================================================================
// SYSTEM DESCRIPTOR
// =============================================================================

/// A named rule-set: a base part, ordered optional parts, and bridges.
pub struct System {
    key: String,
    base: Box<dyn Part>,
    parts: Vec<(String, Box<dyn Part>)>,
    bridges: Vec<Bridge>,
}

impl System {
    /// Create a system descriptor from its key and base part.
    pub fn new(key: impl Into<String>, base: impl Part + 'static) -> Self {
        Self {
            key: key.into(),
            base: Box::new(base),
            parts: Vec::new(),
            bridges: Vec::new(),
        }
    }

    /// Register an optional part. Registration order is preserved.
    #[must_use]
    pub fn with_part(mut self, key: impl Into<String>, part: impl Part + 'static) -> Self {
        self.parts.push((key.into(), Box::new(part)));
        self
    }

    /// Register a bridge.
    #[must_use]
    pub fn with_bridge(mut self, bridge: Bridge) -> Self {
        self.bridges.push(bridge);
        self
    }

    /// The system's registry key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Every part key the system exposes, `"base"` first.
    #[must_use]
    pub fn part_keys(&self) -> Vec<&str> {
        let mut keys = vec![BASE_PART];
        keys.extend(self.parts.iter().map(|(k, _)| k.as_str()));
        keys
    }

    /// Every bridge id the system exposes, in registration order.
    #[must_use]
    pub fn bridge_ids(&self) -> Vec<&str> {
        self.bridges.iter().map(Bridge::id).collect()
    }

    pub(crate) fn base(&self) -> &dyn Part {
        self.base.as_ref()
    }

    pub(crate) fn part(&self, key: &str) -> Option<&dyn Part> {
        self.parts
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, p)| p.as_ref())
    }

    pub(crate) fn bridge(&self, id: &str) -> Option<&Bridge> {
        self.bridges.iter().find(|b| b.id() == id)
    }
}

impl fmt::Debug for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("System")
            .field("key", &self.key)
            .field("parts", &self.parts.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .field("bridges", &self.bridges)
            .finish()
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Immutable catalog of registered systems.
#[derive(Debug)]
pub struct Registry {
    systems: Vec<System>,
}

impl Registry {
    /// Build a registry, validating every descriptor eagerly.
    ///
    /// Rejected at construction rather than discovered as runtime failures:
    /// duplicate system keys, duplicate part keys within a system, a part
    /// registered under the reserved `"base"` key, duplicate bridge ids,
    /// and bridge prerequisites naming unknown parts.
    pub fn new(systems: Vec<System>) -> Result<Self, ArcanaError> {
        let mut system_keys = BTreeSet::new();
        for system in &systems {
            if !system_keys.insert(system.key()) {
                return Err(ArcanaError::InvalidRegistry(format!(
                    "duplicate system key: {}",
                    system.key()
                )));
            }

            let mut part_keys = BTreeSet::new();
            part_keys.insert(BASE_PART);
            for (key, _) in &system.parts {
                if key == BASE_PART {
                    return Err(ArcanaError::InvalidRegistry(format!(
                        "system {}: part key \"{BASE_PART}\" is reserved",
                        system.key()
                    )));
                }
                if !part_keys.insert(key.as_str()) {
                    return Err(ArcanaError::InvalidRegistry(format!(
                        "system {}: duplicate part key: {key}",
                        system.key()
                    )));
                }
            }

            let mut bridge_ids = BTreeSet::new();
            for bridge in &system.bridges {
                if !bridge_ids.insert(bridge.id()) {
                    return Err(ArcanaError::InvalidRegistry(format!(
                        "system {}: duplicate bridge id: {}",
                        system.key(),
                        bridge.id()
                    )));
                }
                for required in bridge.requires() {
                    if !part_keys.contains(required.as_str()) {
                        return Err(ArcanaError::InvalidRegistry(format!(
                            "system {}: bridge {} requires unknown part: {required}",
                            system.key(),
                            bridge.id()
                        )));
                    }
                }
            }
        }

        Ok(Self { systems })
    }

    /// Lookup a system by key.
    #[must_use]
    pub fn system(&self, key: &str) -> Option<&System> {
        self.systems.iter().find(|s| s.key() == key)
    }

    /// Check whether a system key is registered.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.system(key).is_some()
    }

    /// Every registered system key, in registration order.
    #[must_use]
    pub fn system_keys(&self) -> Vec<&str> {
        self.systems.iter().map(System::key).collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
