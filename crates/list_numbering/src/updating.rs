//! Update stream from the document runtime into the numbering engine.
//!
//! The DOM runtime broadcasts batches of [`ListUpdate`]s; a [`ListMirror`]
//! drains them on the layout thread and applies them to its subscriber.

use crate::tree::NodeKind;
use crate::{NodeKey, NumberingEngine, NumberingStyle};
use anyhow::{Error, anyhow};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

/// A change to the document that can affect list numbering.
///
/// Attribute values arrive already parsed; malformed attributes were normalized
/// to their defaults by the attribute layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListUpdate {
    InsertNode {
        parent: NodeKey,
        node: NodeKey,
        kind: NodeKind,
        pos: usize,
    },
    RemoveNode {
        node: NodeKey,
    },
    /// `value` on a list item; `None` when the attribute was removed.
    SetExplicitValue {
        node: NodeKey,
        value: Option<i32>,
    },
    /// `start` and `reversed` on a list container.
    SetScopeAttributes {
        node: NodeKey,
        start: Option<i32>,
        reversed: bool,
    },
    SetExcluded {
        node: NodeKey,
        excluded: bool,
    },
    /// Computed `list-style-type` of an item or list container.
    SetMarkerStyle {
        node: NodeKey,
        style: Option<NumberingStyle>,
    },
}

pub trait ListSubscriber {
    fn apply_update(&mut self, update: ListUpdate) -> Result<(), Error>;
}

impl ListSubscriber for NumberingEngine {
    fn apply_update(&mut self, update: ListUpdate) -> Result<(), Error> {
        match update {
            ListUpdate::InsertNode {
                parent,
                node,
                kind,
                pos,
            } => self.insert_node(parent, node, kind, pos),
            ListUpdate::RemoveNode { node } => self.remove_node(node),
            ListUpdate::SetExplicitValue { node, value } => match value {
                Some(value) => self.set_explicit_value(node, value),
                None => self.clear_explicit_value(node),
            },
            ListUpdate::SetScopeAttributes {
                node,
                start,
                reversed,
            } => self.set_scope_attributes(node, start, reversed),
            ListUpdate::SetExcluded { node, excluded } => {
                self.set_excluded_from_numbering(node, excluded)
            }
            ListUpdate::SetMarkerStyle { node, style } => self.set_marker_style(node, style),
        }
    }
}

/// Mirror that applies incoming update batches to a [`ListSubscriber`].
pub struct ListMirror<T: ListSubscriber> {
    in_updater: broadcast::Receiver<Vec<ListUpdate>>,
    mirror: T,
}

impl<T: ListSubscriber> ListMirror<T> {
    pub fn new(in_updater: broadcast::Receiver<Vec<ListUpdate>>, mirror: T) -> Self {
        Self { in_updater, mirror }
    }

    /// Apply every batch currently queued, without blocking.
    ///
    /// Returns the number of batches applied. A lagged receiver has lost
    /// batches and can no longer mirror the document, so that is an error too.
    pub fn try_update_sync(&mut self) -> Result<usize, Error> {
        let mut applied = 0;
        loop {
            match self.in_updater.try_recv() {
                Ok(batch) => {
                    for update in batch {
                        self.mirror.apply_update(update)?;
                    }
                    applied += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Lagged(skipped)) => {
                    log::warn!("List mirror dropped {skipped} update batch(es)");
                    return Err(anyhow!("list mirror lagged behind by {skipped} batches"));
                }
                Err(TryRecvError::Closed) => {
                    return Err(anyhow!("update channel was closed before document ended"));
                }
            }
        }
        Ok(applied)
    }

    pub fn mirror(&self) -> &T {
        &self.mirror
    }

    /// The subscriber itself, for mutations that do not arrive as updates.
    pub fn mirror_mut(&mut self) -> &mut T {
        &mut self.mirror
    }
}
