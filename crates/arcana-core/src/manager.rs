//! # Module Manager
//!
//! State machine over `(active system, loaded parts, bridged parts)`.
//!
//! The manager is the sole authority for what is currently loaded. It owns
//! an immutable [`Registry`] and acts on a [`Graph`] passed per call; it
//! never touches graph content itself, only dispatches to registered
//! loaders, unloaders, and bridge actions.

use crate::graph::Graph;
use crate::primitives::BASE_PART;
use crate::registry::Registry;
use crate::types::ArcanaError;
use std::collections::BTreeSet;

/// Result of a bridge invocation.
///
/// `AlreadyFired` and `NotReady` are informative no-ops, not errors: there
/// is no automatic retry, so after loading more parts the caller must
/// re-invoke [`ModuleManager::run_bridge`] itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeOutcome {
    /// The action ran and was recorded.
    Fired,
    /// The bridge fired earlier in this activation; nothing happened.
    AlreadyFired,
    /// Not all required parts are loaded yet; nothing happened.
    NotReady,
}

/// Tracks which rule-set is active, which parts are loaded (in order), and
/// which bridges have fired.
///
/// Created empty; reset to empty whenever the active system is unloaded
/// or switched.
#[derive(Debug)]
pub struct ModuleManager {
    registry: Registry,
    active: Option<String>,
    loaded: Vec<String>,
    bridged: BTreeSet<String>,
}

impl ModuleManager {
    /// Create a manager over an already-validated registry.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            active: None,
            loaded: Vec::new(),
            bridged: BTreeSet::new(),
        }
    }

    /// The injected registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The currently active system key, if any.
    #[must_use]
    pub fn active_system(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Activate a system.
    ///
    /// No-op when `key` is already active. If a different system is active
    /// it is fully unloaded first. Runs the base loader and resets state to
    /// `{active: key, loaded: ["base"]}`.
    pub fn load_system(&mut self, graph: &mut Graph, key: &str) -> Result<(), ArcanaError> {
        if self.active.as_deref() == Some(key) {
            return Ok(());
        }
        // Resolve the target before tearing anything down, so an unknown
        // key leaves the current system untouched
        if !self.registry.contains(key) {
            return Err(ArcanaError::SystemNotFound(key.to_string()));
        }
        if self.active.is_some() {
            self.unload_system(graph)?;
        }

        match self.registry.system(key) {
            Some(system) => system.base().load(graph)?,
            None => return Err(ArcanaError::SystemNotFound(key.to_string())),
        }

        self.active = Some(key.to_string());
        self.loaded = vec![BASE_PART.to_string()];
        self.bridged.clear();
        Ok(())
    }

    /// Load a named optional part of the active system.
    ///
    /// Fails with `NoActiveSystem` before any system is loaded and
    /// `PartNotFound` for keys outside the active system. Not idempotent at
    /// this layer: re-invoking runs the loader again, and whether that is
    /// safe depends entirely on the loader's own idempotence.
    pub fn load_part(&mut self, graph: &mut Graph, key: &str) -> Result<(), ArcanaError> {
        let Some(active) = self.active.as_deref() else {
            return Err(ArcanaError::NoActiveSystem);
        };
        let system = self
            .registry
            .system(active)
            .ok_or_else(|| ArcanaError::SystemNotFound(active.to_string()))?;
        let part = system
            .part(key)
            .ok_or_else(|| ArcanaError::PartNotFound(key.to_string()))?;

        part.load(graph)?;
        if !self.loaded.iter().any(|k| k == key) {
            self.loaded.push(key.to_string());
        }
        Ok(())
    }

    /// Unload the active system, if any.
    ///
    /// Runs the unloader for every loaded part in **reverse insertion
    /// order** (later-loaded, presumptively-dependent parts come down
    /// first; base last), then clears all orchestration state. State is
    /// cleared even when an unloader fails partway through.
    pub fn unload_system(&mut self, graph: &mut Graph) -> Result<(), ArcanaError> {
        let Some(active) = self.active.take() else {
            return Ok(());
        };
        let loaded = std::mem::take(&mut self.loaded);
        self.bridged.clear();

        let system = self
            .registry
            .system(&active)
            .ok_or_else(|| ArcanaError::SystemNotFound(active.clone()))?;
        for key in loaded.iter().rev() {
            if key == BASE_PART {
                system.base().unload(graph)?;
            } else {
                system
                    .part(key)
                    .ok_or_else(|| ArcanaError::PartNotFound(key.clone()))?
                    .unload(graph)?;
            }
        }
        Ok(())
    }

    /// Run a bridge of the active system.
    ///
    /// Fails with `NoActiveSystem` / `BridgeNotFound` for bad state or
    /// keys. Returns [`BridgeOutcome::AlreadyFired`] or
    /// [`BridgeOutcome::NotReady`] without running the action; otherwise
    /// runs it exactly once and records the id.
    pub fn run_bridge(&mut self, graph: &mut Graph, id: &str) -> Result<BridgeOutcome, ArcanaError> {
        let Some(active) = self.active.as_deref() else {
            return Err(ArcanaError::NoActiveSystem);
        };
        let system = self
            .registry
            .system(active)
            .ok_or_else(|| ArcanaError::SystemNotFound(active.to_string()))?;
        let bridge = system
            .bridge(id)
            .ok_or_else(|| ArcanaError::BridgeNotFound(id.to_string()))?;

        if self.bridged.contains(id) {
            return Ok(BridgeOutcome::AlreadyFired);
        }
        let ready = bridge
            .requires()
            .iter()
            .all(|required| self.loaded.iter().any(|k| k == required));
        if !ready {
            return Ok(BridgeOutcome::NotReady);
        }

        bridge.run(graph)?;
        self.bridged.insert(id.to_string());
        Ok(BridgeOutcome::Fired)
    }

    // =========================================================================
    // QUERY SURFACE
    // =========================================================================

    /// Every part key a registered system exposes, independent of live
    /// state. `"base"` is always first.
    pub fn available_parts(&self, system: &str) -> Result<Vec<String>, ArcanaError> {
        let system = self
            .registry
            .system(system)
            .ok_or_else(|| ArcanaError::SystemNotFound(system.to_string()))?;
        Ok(system.part_keys().into_iter().map(String::from).collect())
    }

    /// Every bridge id a registered system exposes, independent of live
    /// state.
    pub fn available_bridges(&self, system: &str) -> Result<Vec<String>, ArcanaError> {
        let system = self
            .registry
            .system(system)
            .ok_or_else(|| ArcanaError::SystemNotFound(system.to_string()))?;
        Ok(system.bridge_ids().into_iter().map(String::from).collect())
    }

    /// Live state: loaded part keys in load order.
    #[must_use]
    pub fn loaded_parts(&self) -> &[String] {
        &self.loaded
    }

    /// Live state: ids of bridges that have fired in this activation.
    #[must_use]
    pub fn bridged_parts(&self) -> Vec<&str> {
        self.bridged.iter().map(String::as_str).collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
