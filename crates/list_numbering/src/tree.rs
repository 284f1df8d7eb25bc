//! Arena mirror of the document structure relevant to list numbering.
//!
//! Nodes are addressed by `indextree::NodeId`; every cross reference (item to
//! scope, item to previous item) is a lookup through the arena, never a stored
//! pointer, so the tree collaborator stays the only owner of node lifetime.

use crate::NodeKey;
use crate::item::ListItem;
use crate::scope::{IMPLICIT_SCOPE, ListScope};
use anyhow::{Result, anyhow, bail};
use indextree::{Arena, Node, NodeId};
use rustc_hash::FxHashMap;

/// What a node is, as announced by the tree collaborator on insertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Any node that neither numbers nor is numbered.
    Container,
    /// A list container establishing a numbering context.
    Scope(ListScope),
    /// A numberable node.
    Item,
}

#[derive(Debug)]
pub(crate) enum NodeRole {
    Container,
    Scope(ListScope),
    Item(ListItem),
}

#[derive(Debug)]
pub(crate) struct TreeNode {
    key: NodeKey,
    role: NodeRole,
}

impl TreeNode {
    fn new(key: NodeKey, kind: NodeKind) -> Self {
        let role = match kind {
            NodeKind::Container => NodeRole::Container,
            NodeKind::Scope(scope) => NodeRole::Scope(scope),
            NodeKind::Item => NodeRole::Item(ListItem::new()),
        };
        Self { key, role }
    }
}

/// Document structure as seen by the numbering engine.
#[derive(Debug)]
pub struct ListTree {
    arena: Arena<TreeNode>,
    root: NodeId,
    ids: FxHashMap<NodeKey, NodeId>,
}

impl Default for ListTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ListTree {
    /// Create a tree holding only [`NodeKey::ROOT`].
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(TreeNode::new(NodeKey::ROOT, NodeKind::Container));
        let mut ids = FxHashMap::default();
        ids.insert(NodeKey::ROOT, root);
        Self { arena, root, ids }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn id(&self, key: NodeKey) -> Option<NodeId> {
        self.ids.get(&key).copied()
    }

    pub fn key(&self, id: NodeId) -> Option<NodeKey> {
        self.node(id).map(|node| node.key)
    }

    /// Number of mirrored nodes below the root.
    pub fn len(&self) -> usize {
        self.ids.len().saturating_sub(1)
    }

    /// Whether only the root is mirrored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.arena
            .get(id)
            .filter(|node| !node.is_removed())
            .map(Node::get)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut TreeNode> {
        self.arena
            .get_mut(id)
            .filter(|node| !node.is_removed())
            .map(Node::get_mut)
    }

    pub fn item(&self, id: NodeId) -> Option<&ListItem> {
        match &self.node(id)?.role {
            NodeRole::Item(item) => Some(item),
            NodeRole::Container | NodeRole::Scope(_) => None,
        }
    }

    pub(crate) fn item_mut(&mut self, id: NodeId) -> Option<&mut ListItem> {
        match &mut self.node_mut(id)?.role {
            NodeRole::Item(item) => Some(item),
            NodeRole::Container | NodeRole::Scope(_) => None,
        }
    }

    /// Attributes of `id` when it is a list container.
    pub fn scope(&self, id: NodeId) -> Option<&ListScope> {
        match &self.node(id)?.role {
            NodeRole::Scope(scope) => Some(scope),
            NodeRole::Container | NodeRole::Item(_) => None,
        }
    }

    pub(crate) fn scope_mut(&mut self, id: NodeId) -> Option<&mut ListScope> {
        match &mut self.node_mut(id)?.role {
            NodeRole::Scope(scope) => Some(scope),
            NodeRole::Container | NodeRole::Item(_) => None,
        }
    }

    /// Attributes governing the numbering context rooted at `scope`; nodes that
    /// only act as an implicit scope use the defaults.
    pub fn scope_attributes(&self, scope: NodeId) -> &ListScope {
        self.scope(scope).unwrap_or(&IMPLICIT_SCOPE)
    }

    fn is_scope(&self, id: NodeId) -> bool {
        self.scope(id).is_some()
    }

    /// Insert `node` as a leaf at child index `pos` of `parent` (clamped to the end).
    pub fn insert(
        &mut self,
        parent: NodeKey,
        node: NodeKey,
        kind: NodeKind,
        pos: usize,
    ) -> Result<NodeId> {
        let parent_id = self
            .id(parent)
            .ok_or_else(|| anyhow!("insert of {node:?} under unknown parent {parent:?}"))?;
        if self.ids.contains_key(&node) {
            bail!("node {node:?} is already in the tree");
        }
        let new_id = self.arena.new_node(TreeNode::new(node, kind));
        let anchor = parent_id.children(&self.arena).nth(pos);
        let attached = match anchor {
            Some(sibling) => sibling.checked_insert_before(new_id, &mut self.arena),
            None => parent_id.checked_append(new_id, &mut self.arena),
        };
        if let Err(err) = attached {
            new_id.remove(&mut self.arena);
            bail!("failed to attach {node:?} under {parent:?}: {err:?}");
        }
        self.ids.insert(node, new_id);
        Ok(new_id)
    }

    /// Remove `id` and its whole subtree, forgetting every key inside it.
    pub fn remove_subtree(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            bail!("the root node cannot be removed");
        }
        let keys: Vec<NodeKey> = id
            .descendants(&self.arena)
            .filter_map(|descendant| self.key(descendant))
            .collect();
        for key in &keys {
            self.ids.remove(key);
        }
        id.remove_subtree(&mut self.arena);
        Ok(())
    }

    /// The numbering context of `id`: the nearest list container ancestor, or
    /// the parent when there is none. `None` only for the root.
    pub fn enclosing_scope(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.arena.get(id)?.parent()?;
        parent
            .ancestors(&self.arena)
            .find(|ancestor| self.is_scope(*ancestor))
            .or(Some(parent))
    }

    /// Whether `id` is an item numbered by `scope`.
    fn is_item_of(&self, scope: NodeId, id: NodeId) -> bool {
        self.item(id).is_some() && self.enclosing_scope(id) == Some(scope)
    }

    /// Next node in document order inside `scope`. When `descend` is false the
    /// children of `id` are skipped.
    fn next_in_order(&self, scope: NodeId, id: NodeId, descend: bool) -> Option<NodeId> {
        if descend && let Some(child) = self.arena.get(id)?.first_child() {
            return Some(child);
        }
        let mut current = id;
        loop {
            if current == scope {
                return None;
            }
            let node = self.arena.get(current)?;
            if let Some(sibling) = node.next_sibling() {
                return Some(sibling);
            }
            current = node.parent()?;
        }
    }

    /// Previous node in document order inside `scope`, never entering a nested
    /// list container.
    fn previous_in_order(&self, scope: NodeId, id: NodeId) -> Option<NodeId> {
        if id == scope {
            return None;
        }
        let node = self.arena.get(id)?;
        if let Some(sibling) = node.previous_sibling() {
            let mut current = sibling;
            while !self.is_scope(current) {
                match self.arena.get(current)?.last_child() {
                    Some(child) => current = child,
                    None => break,
                }
            }
            return Some(current);
        }
        node.parent().filter(|parent| *parent != scope)
    }

    /// The next item of `scope` after `from`, excluded items included.
    ///
    /// With `descend` false the subtree of `from` is skipped; nested list
    /// containers are always skipped.
    pub fn next_item(&self, scope: NodeId, from: NodeId, descend: bool) -> Option<NodeId> {
        let mut current = self.next_in_order(scope, from, descend)?;
        loop {
            if self.is_item_of(scope, current) {
                return Some(current);
            }
            let descend_current = !self.is_scope(current);
            current = self.next_in_order(scope, current, descend_current)?;
        }
    }

    /// The nearest preceding item of `scope` that takes part in numbering.
    pub fn previous_item(&self, scope: NodeId, from: NodeId) -> Option<NodeId> {
        let mut current = self.previous_in_order(scope, from)?;
        loop {
            if self.is_item_of(scope, current)
                && self.item(current).is_some_and(|item| !item.is_excluded())
            {
                return Some(current);
            }
            current = self.previous_in_order(scope, current)?;
        }
    }

    /// Every item of `scope` in document order, excluded items included.
    pub fn items(&self, scope: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let first = self.next_item(scope, scope, true);
        core::iter::successors(first, move |current| self.next_item(scope, *current, true))
    }

    /// Items of `scope` that take part in numbering.
    pub fn item_count(&self, scope: NodeId) -> usize {
        self.items(scope)
            .filter(|id| self.item(*id).is_some_and(|item| !item.is_excluded()))
            .count()
    }

    /// Whether the subtree rooted at `id` holds any item numbered by `scope`.
    pub fn subtree_has_items_of(&self, scope: NodeId, id: NodeId) -> bool {
        id.descendants(&self.arena)
            .any(|descendant| self.is_item_of(scope, descendant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: u64) -> NodeKey {
        NodeKey(raw)
    }

    /// ROOT > ol#1 > [li#2, div#3 > [li#4, ol#5 > [li#6]], li#7]
    fn nested_tree() -> ListTree {
        let mut tree = ListTree::new();
        tree.insert(NodeKey::ROOT, key(1), NodeKind::Scope(ListScope::ordered()), 0)
            .unwrap();
        tree.insert(key(1), key(2), NodeKind::Item, 0).unwrap();
        tree.insert(key(1), key(3), NodeKind::Container, 1).unwrap();
        tree.insert(key(3), key(4), NodeKind::Item, 0).unwrap();
        tree.insert(key(3), key(5), NodeKind::Scope(ListScope::ordered()), 1)
            .unwrap();
        tree.insert(key(5), key(6), NodeKind::Item, 0).unwrap();
        tree.insert(key(1), key(7), NodeKind::Item, 2).unwrap();
        tree
    }

    fn keys(tree: &ListTree, ids: impl Iterator<Item = NodeId>) -> Vec<u64> {
        ids.filter_map(|id| tree.key(id)).map(|found| found.0).collect()
    }

    #[test]
    fn scope_items_skip_nested_lists() {
        let tree = nested_tree();
        let outer = tree.id(key(1)).unwrap();
        let inner = tree.id(key(5)).unwrap();
        assert_eq!(keys(&tree, tree.items(outer)), vec![2, 4, 7]);
        assert_eq!(keys(&tree, tree.items(inner)), vec![6]);
        assert_eq!(tree.item_count(outer), 3);
        assert_eq!(tree.enclosing_scope(tree.id(key(4)).unwrap()), Some(outer));
        assert_eq!(tree.enclosing_scope(tree.id(key(6)).unwrap()), Some(inner));
    }

    #[test]
    fn previous_item_walks_backward_over_nested_lists() {
        let tree = nested_tree();
        let outer = tree.id(key(1)).unwrap();
        let last = tree.id(key(7)).unwrap();
        let before_last = tree.previous_item(outer, last).unwrap();
        assert_eq!(tree.key(before_last), Some(key(4)));
        let first = tree.previous_item(outer, before_last).unwrap();
        assert_eq!(tree.key(first), Some(key(2)));
        assert_eq!(tree.previous_item(outer, first), None);
    }

    #[test]
    fn items_without_list_use_parent_scope() {
        let mut tree = ListTree::new();
        tree.insert(NodeKey::ROOT, key(1), NodeKind::Container, 0).unwrap();
        tree.insert(key(1), key(2), NodeKind::Item, 0).unwrap();
        tree.insert(key(2), key(3), NodeKind::Item, 0).unwrap();
        let div = tree.id(key(1)).unwrap();
        let outer_item = tree.id(key(2)).unwrap();
        assert_eq!(tree.enclosing_scope(outer_item), Some(div));
        assert_eq!(
            tree.enclosing_scope(tree.id(key(3)).unwrap()),
            Some(outer_item)
        );
        assert_eq!(keys(&tree, tree.items(div)), vec![2]);
        assert_eq!(tree.scope_attributes(div), &ListScope::ordered());
    }

    #[test]
    fn insert_and_remove_maintain_keys() {
        assert!(ListTree::new().is_empty());
        let mut tree = nested_tree();
        assert_eq!(tree.len(), 7);
        assert!(!tree.is_empty());
        assert!(tree.insert(key(99), key(100), NodeKind::Item, 0).is_err());
        assert!(tree.insert(key(1), key(2), NodeKind::Item, 0).is_err());

        let div = tree.id(key(3)).unwrap();
        tree.remove_subtree(div).unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.id(key(6)), None);
        let outer = tree.id(key(1)).unwrap();
        assert_eq!(keys(&tree, tree.items(outer)), vec![2, 7]);
        assert!(tree.remove_subtree(tree.root()).is_err());
    }

    #[test]
    fn insert_position_is_clamped() {
        let mut tree = ListTree::new();
        tree.insert(NodeKey::ROOT, key(1), NodeKind::Scope(ListScope::ordered()), 0)
            .unwrap();
        tree.insert(key(1), key(2), NodeKind::Item, 5).unwrap();
        tree.insert(key(1), key(3), NodeKind::Item, 0).unwrap();
        tree.insert(key(1), key(4), NodeKind::Item, 1).unwrap();
        let list = tree.id(key(1)).unwrap();
        assert_eq!(keys(&tree, tree.items(list)), vec![3, 4, 2]);
    }
}
