//! The numbering engine: reacts to tree and attribute changes by invalidating
//! cached ordinals, and computes ordinals and marker text on demand.
//!
//! HTML: <https://html.spec.whatwg.org/multipage/grouping-content.html#ordinal-value>

use crate::NodeKey;
use crate::cache::CacheState;
use crate::config::NumberingConfig;
use crate::item::ListItem;
use crate::tree::{ListTree, NodeKind};
use anyhow::{Result, anyhow};
use css_counter_styles::NumberingStyle;
use indextree::NodeId;
use smallvec::SmallVec;
use tracing::trace_span;

/// Lazily numbered mirror of the lists in a document.
///
/// Mutations are cheap: they only mark caches dirty, starting at the changed
/// item and moving forward. Queries take `&self` and may run during layout; they
/// only ever write the per-item caches.
#[derive(Debug, Default)]
pub struct NumberingEngine {
    tree: ListTree,
    config: NumberingConfig,
}

impl NumberingEngine {
    pub fn new() -> Self {
        Self::with_config(NumberingConfig::default())
    }

    pub fn with_config(config: NumberingConfig) -> Self {
        Self {
            tree: ListTree::new(),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &NumberingConfig {
        &self.config
    }

    #[inline]
    pub fn tree(&self) -> &ListTree {
        &self.tree
    }

    fn resolve(&self, node: NodeKey) -> Result<NodeId> {
        self.tree.id(node).ok_or_else(|| anyhow!("unknown node {node:?}"))
    }

    fn item_mut(&mut self, node: NodeKey) -> Result<(NodeId, &mut ListItem)> {
        let id = self.resolve(node)?;
        let item = self
            .tree
            .item_mut(id)
            .ok_or_else(|| anyhow!("{node:?} is not a list item"))?;
        Ok((id, item))
    }

    // ------------------------------------------------------------------
    // Inbound notifications
    // ------------------------------------------------------------------

    /// Mirror the insertion of a leaf node at child index `pos` of `parent`.
    pub fn insert_node(
        &mut self,
        parent: NodeKey,
        node: NodeKey,
        kind: NodeKind,
        pos: usize,
    ) -> Result<()> {
        let is_item = kind == NodeKind::Item;
        let id = self.tree.insert(parent, node, kind, pos)?;
        log::debug!("Inserted {node:?} under {parent:?} at {pos}");
        if is_item {
            // The new item starts dirty; its successors now count from it.
            self.invalidate_after(id, true);
        }
        Ok(())
    }

    /// Mirror the removal of `node` and its subtree.
    pub fn remove_node(&mut self, node: NodeKey) -> Result<()> {
        let id = self.resolve(node)?;
        let scope = self
            .tree
            .enclosing_scope(id)
            .filter(|scope| self.tree.subtree_has_items_of(*scope, id));
        let next = scope.and_then(|scope| self.tree.next_item(scope, id, false));
        self.tree.remove_subtree(id)?;
        log::debug!("Removed {node:?}");
        if let Some(scope) = scope {
            self.invalidate_structure(scope, next);
        }
        Ok(())
    }

    /// The item's `value` attribute was set.
    pub fn set_explicit_value(&mut self, node: NodeKey, value: i32) -> Result<()> {
        self.update_explicit_value(node, Some(value))
    }

    /// The item's `value` attribute was removed.
    pub fn clear_explicit_value(&mut self, node: NodeKey) -> Result<()> {
        self.update_explicit_value(node, None)
    }

    fn update_explicit_value(&mut self, node: NodeKey, value: Option<i32>) -> Result<()> {
        let (id, item) = self.item_mut(node)?;
        if !item.set_explicit_value(value) {
            return Ok(());
        }
        item.cache().invalidate();
        // The item count is unchanged, so even count-based lists only need
        // the items after this one.
        self.invalidate_after(id, false);
        Ok(())
    }

    /// Include or exclude an item from numbering without moving it.
    pub fn set_excluded_from_numbering(&mut self, node: NodeKey, excluded: bool) -> Result<()> {
        let (id, item) = self.item_mut(node)?;
        if !item.set_excluded(excluded) {
            return Ok(());
        }
        item.cache().invalidate();
        self.invalidate_after(id, true);
        Ok(())
    }

    /// The list container's `start` or `reversed` attribute changed.
    pub fn set_scope_attributes(
        &mut self,
        node: NodeKey,
        start: Option<i32>,
        reversed: bool,
    ) -> Result<()> {
        let id = self.resolve(node)?;
        let scope = self
            .tree
            .scope_mut(id)
            .ok_or_else(|| anyhow!("{node:?} is not a list container"))?;
        if scope.start == start && scope.reversed == reversed {
            return Ok(());
        }
        scope.start = start;
        scope.reversed = reversed;
        log::debug!("List {node:?} now start={start:?} reversed={reversed}");
        self.invalidate_scope(id);
        Ok(())
    }

    /// The computed `list-style-type` of an item or list container changed.
    ///
    /// Marker text is rendered on demand, so no cache is touched.
    pub fn set_marker_style(&mut self, node: NodeKey, style: Option<NumberingStyle>) -> Result<()> {
        let id = self.resolve(node)?;
        if let Some(item) = self.tree.item_mut(id) {
            item.set_style(style);
        } else if let Some(scope) = self.tree.scope_mut(id) {
            scope.style = style;
        } else {
            return Err(anyhow!("{node:?} has no marker style"));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Outbound queries
    // ------------------------------------------------------------------

    /// Ordinal of the item, or `None` for unknown keys and non-item nodes.
    pub fn value(&self, node: NodeKey) -> Option<i32> {
        self.value_of(self.tree.id(node)?)
    }

    /// Marker text without suffix (`"3"`, `"iii"`, `"•"`).
    pub fn marker_text(&self, node: NodeKey) -> Option<String> {
        let id = self.tree.id(node)?;
        let style = self.marker_style(id)?;
        if !style.is_ordinal() {
            return Some(css_counter_styles::format(0, style));
        }
        Some(css_counter_styles::format(self.value_of(id)?, style))
    }

    /// Marker text followed by its style's suffix (`"3."`, `"iii."`, `"•"`).
    pub fn marker_text_with_suffix(&self, node: NodeKey) -> Option<String> {
        let text = self.marker_text(node)?;
        let style = self.marker_style(self.tree.id(node)?)?;
        Some(css_counter_styles::with_suffix(&text, style))
    }

    pub fn has_explicit_value(&self, node: NodeKey) -> bool {
        self.explicit_value(node).is_some()
    }

    pub fn explicit_value(&self, node: NodeKey) -> Option<i32> {
        self.tree.item(self.tree.id(node)?)?.explicit_value()
    }

    pub fn excluded_from_numbering(&self, node: NodeKey) -> bool {
        self.tree
            .id(node)
            .and_then(|id| self.tree.item(id))
            .is_some_and(ListItem::is_excluded)
    }

    /// Cache state of an item, for callers that want to observe laziness.
    pub fn cache_state(&self, node: NodeKey) -> Option<CacheState> {
        Some(self.tree.item(self.tree.id(node)?)?.cache().state())
    }

    /// Key of the node whose numbering context the item belongs to.
    pub fn scope_of(&self, node: NodeKey) -> Option<NodeKey> {
        let scope = self.tree.enclosing_scope(self.tree.id(node)?)?;
        self.tree.key(scope)
    }

    /// Number of items numbered by `scope`, excluded items not counted.
    pub fn item_count(&self, scope: NodeKey) -> usize {
        let _span = trace_span!("list_item_count", ?scope).entered();
        self.tree.id(scope).map_or(0, |id| self.tree.item_count(id))
    }

    /// Mark every item of `scope` dirty. Nothing is recomputed until queried.
    pub fn bulk_invalidate(&self, scope: NodeKey) {
        if let Some(id) = self.tree.id(scope) {
            self.invalidate_scope(id);
        }
    }

    // ------------------------------------------------------------------
    // Invalidation
    // ------------------------------------------------------------------

    fn invalidate_after(&self, id: NodeId, structural: bool) {
        let Some(scope) = self.tree.enclosing_scope(id) else {
            return;
        };
        let next = self.tree.next_item(scope, id, true);
        if structural {
            self.invalidate_structure(scope, next);
        } else {
            self.invalidate_forward(scope, next);
        }
    }

    /// Invalidation after the set of numbered items in `scope` changed.
    fn invalidate_structure(&self, scope: NodeId, first: Option<NodeId>) {
        if self.tree.scope_attributes(scope).depends_on_item_count() {
            self.invalidate_scope(scope);
        } else {
            self.invalidate_forward(scope, first);
        }
    }

    /// Mark `first` and the items after it dirty.
    ///
    /// Stops at the first numbered item that is already dirty: anything after it
    /// that depends on it was invalidated together with it.
    fn invalidate_forward(&self, scope: NodeId, first: Option<NodeId>) {
        if self.config.full_scope_invalidation {
            self.invalidate_scope(scope);
            return;
        }
        let mut invalidated = 0_usize;
        let mut cursor = first;
        while let Some(id) = cursor {
            if let Some(item) = self.tree.item(id) {
                let was_valid = item.cache().invalidate();
                if !was_valid && !item.is_excluded() {
                    break;
                }
                invalidated += usize::from(was_valid);
            }
            cursor = self.tree.next_item(scope, id, true);
        }
        log::trace!("Forward invalidation touched {invalidated} list item(s)");
    }

    fn invalidate_scope(&self, scope: NodeId) {
        let _span = trace_span!("list_bulk_invalidate").entered();
        let invalidated = self
            .tree
            .items(scope)
            .filter_map(|id| self.tree.item(id))
            .filter(|item| item.cache().invalidate())
            .count();
        log::debug!("Bulk invalidated {invalidated} list item(s)");
    }

    // ------------------------------------------------------------------
    // Value computation
    // ------------------------------------------------------------------

    /// Resolve the ordinal of `id`, filling every dirty cache on the way.
    ///
    /// Walks backward to the nearest item with a valid cache, an explicit
    /// value, or no predecessor, then assigns ordinals front to back. Iterative
    /// so long lists cannot exhaust the stack.
    fn value_of(&self, id: NodeId) -> Option<i32> {
        if let Some(cached) = self.tree.item(id)?.cache().get() {
            return Some(cached);
        }
        let scope = self.tree.enclosing_scope(id)?;
        let attributes = self.tree.scope_attributes(scope);

        let mut chain: SmallVec<&ListItem, 16> = SmallVec::new();
        let mut running = None;
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(item) = self.tree.item(current) else {
                break;
            };
            if let Some(cached) = item.cache().get() {
                running = Some(cached);
                break;
            }
            if let Some(explicit) = item.explicit_value() {
                item.cache().store(explicit);
                running = Some(explicit);
                break;
            }
            chain.push(item);
            cursor = self.tree.previous_item(scope, current);
        }

        let step = attributes.step();
        for item in chain.iter().rev() {
            let value = match running {
                Some(previous) => previous.saturating_add(step),
                None => attributes.first_value(|| self.tree.item_count(scope)),
            };
            item.cache().store(value);
            running = Some(value);
        }
        log::trace!("Recomputed {} list item value(s)", chain.len());
        running
    }

    fn marker_style(&self, id: NodeId) -> Option<&NumberingStyle> {
        let item = self.tree.item(id)?;
        let style = item
            .style()
            .or_else(|| {
                let scope = self.tree.enclosing_scope(id)?;
                self.tree.scope_attributes(scope).style.as_ref()
            })
            .unwrap_or(&self.config.default_style);
        Some(style)
    }
}
