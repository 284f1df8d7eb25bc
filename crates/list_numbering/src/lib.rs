//! Ordinal numbering for list items.
//!
//! The engine mirrors the document structure it cares about (list containers,
//! list items and the nodes between them) and answers `value` / marker text
//! queries for list items lazily:
//!
//! ```text
//! ListUpdate stream ──► NumberingEngine ──► ListTree (indextree arena)
//!                            │                  ├─ Scope(ListScope)
//!                            │                  └─ Item(ListItem { ValueCache })
//!                            └─ value() / marker_text() ──► css_counter_styles
//! ```
//!
//! Mutations only mark caches dirty, and only forward from the mutated item:
//! an item's ordinal depends on its predecessors and never on its successors.
//! Queries walk backward to the nearest item with a valid cache and fill in the
//! chain front to back.
//!
//! # Example
//!
//! ```
//! use list_numbering::{ListScope, NodeKey, NodeKind, NumberingEngine};
//!
//! let mut engine = NumberingEngine::new();
//! let list = NodeKey(1);
//! engine.insert_node(NodeKey::ROOT, list, NodeKind::Scope(ListScope::ordered()), 0)?;
//! for (pos, key) in [NodeKey(2), NodeKey(3), NodeKey(4)].into_iter().enumerate() {
//!     engine.insert_node(list, key, NodeKind::Item, pos)?;
//! }
//! engine.set_explicit_value(NodeKey(3), 10)?;
//! assert_eq!(engine.value(NodeKey(4)), Some(11));
//! assert_eq!(engine.marker_text_with_suffix(NodeKey(2)).as_deref(), Some("1."));
//! # Ok::<(), anyhow::Error>(())
//! ```

#![allow(
    clippy::module_name_repetitions,
    reason = "ListItem / ListScope / ListTree are clearer than bare names"
)]
#![allow(clippy::missing_errors_doc, reason = "Internal crate")]

mod cache;
mod config;
mod engine;
mod item;
mod scope;
mod tree;
pub mod updating;

pub use cache::{CacheState, ValueCache};
pub use config::NumberingConfig;
pub use css_counter_styles::{CustomStyle, NumberingStyle, SymbolSystem};
pub use engine::NumberingEngine;
pub use item::ListItem;
pub use scope::ListScope;
pub use tree::{ListTree, NodeKind};
pub use updating::{ListMirror, ListSubscriber, ListUpdate};

/// A 64-bit stable key for document nodes, shared with the tree collaborator.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct NodeKey(pub u64);

impl NodeKey {
    /// The root node key (always present).
    pub const ROOT: Self = Self(0);
}
