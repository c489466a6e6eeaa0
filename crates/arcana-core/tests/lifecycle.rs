//! # Lifecycle Tests
//!
//! End-to-end coverage of a small rule-set driven through the module
//! manager: the canonical sphere/path ordering scenario, exhaustive
//! unload, and bridge semantics.

use arcana_core::{
    ArcanaError, Bridge, BridgeOutcome, Builder, Graph, ModuleManager, NodeId, NodeKind, Part,
    Registry, System,
};
use std::cell::Cell;
use std::rc::Rc;

// =============================================================================
// FIXTURE RULE-SET
// =============================================================================

/// Base of a minimal tree system: two spheres and the path between them.
struct TreeBase;

impl Part for TreeBase {
    fn load(&self, graph: &mut Graph) -> Result<(), ArcanaError> {
        Builder::sphere(graph, 1, "Kether")?;
        Builder::sphere(graph, 2, "Chokmah")?;
        Builder::path(graph, 1, 1, 2)?;
        Ok(())
    }

    fn unload(&self, graph: &mut Graph) -> Result<(), ArcanaError> {
        graph.remove_node(&NodeId::path(1));
        graph.remove_node(&NodeId::sphere(1));
        graph.remove_node(&NodeId::sphere(2));
        graph.remove_node(&NodeId::number(1));
        graph.remove_node(&NodeId::number(2));
        graph.remove_node(&NodeId::number(11));
        Ok(())
    }
}

/// Optional part attaching a letter to the first path.
struct LettersPart;

impl Part for LettersPart {
    fn load(&self, graph: &mut Graph) -> Result<(), ArcanaError> {
        Builder::attach_letter(graph, &NodeId::path(1), 'A', 1)?;
        Ok(())
    }

    fn unload(&self, graph: &mut Graph) -> Result<(), ArcanaError> {
        graph.remove_node(&NodeId::letter('A'));
        Ok(())
    }
}

/// Optional part attaching signs and their elements.
struct SignsPart;

impl Part for SignsPart {
    fn load(&self, graph: &mut Graph) -> Result<(), ArcanaError> {
        Builder::attach_sign(graph, &NodeId::path(1), "Aries")?;
        Builder::sign_element(graph, "Aries", "Fire")?;
        Ok(())
    }

    fn unload(&self, graph: &mut Graph) -> Result<(), ArcanaError> {
        graph.remove_node(&NodeId::sign("Aries"));
        graph.remove_node(&NodeId::element("Fire"));
        Ok(())
    }
}

fn tree_system() -> System {
    System::new("tree", TreeBase)
        .with_part("letters", LettersPart)
        .with_part("signs", SignsPart)
}

// =============================================================================
// CANONICAL ORDERING SCENARIO
// =============================================================================

#[test]
fn kether_neighborhood_is_ordered() {
    let mut graph = Graph::new();
    TreeBase.load(&mut graph).expect("load");

    let related: Vec<NodeId> = graph
        .related(&NodeId::sphere(1))
        .iter()
        .map(|n| n.id.clone())
        .collect();
    assert_eq!(
        related,
        vec![NodeId::sphere(1), NodeId::number(1), NodeId::path(1)]
    );
}

#[test]
fn path_neighborhood_carries_dual_numbers() {
    let mut graph = Graph::new();
    TreeBase.load(&mut graph).expect("load");

    let related: Vec<NodeId> = graph
        .related(&NodeId::path(1))
        .iter()
        .map(|n| n.id.clone())
        .collect();
    assert_eq!(
        related,
        vec![
            NodeId::path(1),
            NodeId::sphere(1),
            NodeId::sphere(2),
            NodeId::number(1),
            NodeId::number(11),
        ]
    );
}

#[test]
fn walk_crosses_the_path_to_the_far_sphere() {
    let mut graph = Graph::new();
    TreeBase.load(&mut graph).expect("load");

    // Chokmah is two hops from Kether, through the path node
    let spheres: Vec<NodeId> = graph
        .walk_of_kind(&NodeId::sphere(1), 2, NodeKind::Sphere)
        .iter()
        .map(|n| n.id.clone())
        .collect();
    assert_eq!(spheres, vec![NodeId::sphere(2)]);
}

// =============================================================================
// ORCHESTRATION
// =============================================================================

#[test]
fn full_lifecycle_loads_and_unloads_exhaustively() {
    let mut graph = Graph::new();
    let registry = Registry::new(vec![tree_system()]).expect("registry");
    let mut manager = ModuleManager::new(registry);

    manager.load_system(&mut graph, "tree").expect("system");
    manager.load_part(&mut graph, "letters").expect("letters");
    manager.load_part(&mut graph, "signs").expect("signs");

    assert_eq!(manager.loaded_parts(), ["base", "letters", "signs"]);
    assert!(graph.contains(&NodeId::letter('A')));
    assert!(graph.contains(&NodeId::sign("Aries")));

    manager.unload_system(&mut graph).expect("unload");

    assert!(manager.loaded_parts().is_empty());
    assert!(manager.bridged_parts().is_empty());
    // Every node created by the system's loaders is gone
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn unload_order_is_reverse_of_load_order() {
    // Record the order unloaders run in through a shared log
    struct LoggedPart {
        key: &'static str,
        log: Rc<std::cell::RefCell<Vec<&'static str>>>,
    }

    impl Part for LoggedPart {
        fn load(&self, _graph: &mut Graph) -> Result<(), ArcanaError> {
            Ok(())
        }
        fn unload(&self, _graph: &mut Graph) -> Result<(), ArcanaError> {
            self.log.borrow_mut().push(self.key);
            Ok(())
        }
    }

    let log = Rc::new(std::cell::RefCell::new(Vec::new()));
    let part = |key| LoggedPart {
        key,
        log: Rc::clone(&log),
    };
    let registry = Registry::new(vec![
        System::new("logged", part("base"))
            .with_part("first", part("first"))
            .with_part("second", part("second")),
    ])
    .expect("registry");

    let mut graph = Graph::new();
    let mut manager = ModuleManager::new(registry);
    manager.load_system(&mut graph, "logged").expect("system");
    manager.load_part(&mut graph, "first").expect("first");
    manager.load_part(&mut graph, "second").expect("second");
    manager.unload_system(&mut graph).expect("unload");

    assert_eq!(*log.borrow(), vec!["second", "first", "base"]);
}

#[test]
fn bridge_fires_exactly_once() {
    let fired = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&fired);
    let registry = Registry::new(vec![
        tree_system().with_bridge(Bridge::new(
            "letters-to-signs",
            vec!["letters".to_string(), "signs".to_string()],
            move |graph| {
                counter.set(counter.get() + 1);
                graph.link(&NodeId::letter('A'), &NodeId::sign("Aries"))
            },
        )),
    ])
    .expect("registry");

    let mut graph = Graph::new();
    let mut manager = ModuleManager::new(registry);
    manager.load_system(&mut graph, "tree").expect("system");
    manager.load_part(&mut graph, "letters").expect("letters");

    // One prerequisite still missing
    assert_eq!(
        manager.run_bridge(&mut graph, "letters-to-signs").expect("bridge"),
        BridgeOutcome::NotReady
    );
    assert_eq!(fired.get(), 0);

    manager.load_part(&mut graph, "signs").expect("signs");
    for expected in [BridgeOutcome::Fired, BridgeOutcome::AlreadyFired, BridgeOutcome::AlreadyFired]
    {
        assert_eq!(
            manager.run_bridge(&mut graph, "letters-to-signs").expect("bridge"),
            expected
        );
    }
    assert_eq!(fired.get(), 1);

    // The cross-part link the bridge created is present and symmetric
    let letter_signs: Vec<NodeId> = graph
        .related_of_kind(&NodeId::letter('A'), NodeKind::Sign)
        .iter()
        .map(|n| n.id.clone())
        .collect();
    assert_eq!(letter_signs, vec![NodeId::sign("Aries")]);
}

#[test]
fn bridge_state_resets_on_unload() {
    let registry = Registry::new(vec![
        tree_system().with_bridge(Bridge::new("mark", vec!["letters".to_string()], |graph| {
            Builder::attach_color(graph, &NodeId::letter('A'), "White").map(|_| ())
        })),
    ])
    .expect("registry");

    let mut graph = Graph::new();
    let mut manager = ModuleManager::new(registry);
    manager.load_system(&mut graph, "tree").expect("system");
    manager.load_part(&mut graph, "letters").expect("letters");
    assert_eq!(
        manager.run_bridge(&mut graph, "mark").expect("bridge"),
        BridgeOutcome::Fired
    );
    assert_eq!(manager.bridged_parts(), vec!["mark"]);

    manager.unload_system(&mut graph).expect("unload");
    assert!(manager.bridged_parts().is_empty());

    // A fresh activation starts with a clean bridge slate
    manager.load_system(&mut graph, "tree").expect("system");
    manager.load_part(&mut graph, "letters").expect("letters");
    assert_eq!(
        manager.run_bridge(&mut graph, "mark").expect("bridge"),
        BridgeOutcome::Fired
    );
}

#[test]
fn reads_on_unknown_ids_never_fail() {
    let graph = Graph::new();
    let ghost = NodeId::sphere(42);

    assert!(graph.related(&ghost).is_empty());
    assert!(graph.related_of_kind(&ghost, NodeKind::Number).is_empty());
    assert!(graph.related_kinds(&ghost).is_empty());
    assert!(graph.walk(&ghost, 3).is_empty());
}

#[test]
fn loader_content_is_visible_through_correspondences() {
    let mut graph = Graph::new();
    let registry = Registry::new(vec![tree_system()]).expect("registry");
    let mut manager = ModuleManager::new(registry);

    manager.load_system(&mut graph, "tree").expect("system");
    manager.load_part(&mut graph, "signs").expect("signs");

    // sign -> element association established by the part loader
    let elements = graph.related_of_kind(&NodeId::sign("Aries"), NodeKind::Element);
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].id, NodeId::element("Fire"));

    // Letter values added by a different part feed the word checksum
    manager.load_part(&mut graph, "letters").expect("letters");
    assert_eq!(arcana_core::numerology::word_value(&graph, "AA"), Some(2));
}
