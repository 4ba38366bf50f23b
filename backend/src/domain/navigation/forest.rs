//! Tree assembly and cycle checks over a website's navigation items.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use super::{NavigationItem, NavigationItemResponse};
use crate::domain::NavigationItemId;

/// Structural failures in a navigation hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// Stored items already reference each other in a loop.
    #[error("navigation items form a cycle: {}", join_ids(.ids))]
    Cycle { ids: Vec<NavigationItemId> },
    /// A reparenting would make an item its own ancestor.
    #[error("item {id} cannot be placed under {parent}: that would create a cycle")]
    WouldCycle {
        id: NavigationItemId,
        parent: NavigationItemId,
    },
    /// The proposed parent is not an item of the same website.
    #[error("parent item {parent} does not exist in this website")]
    ParentNotFound { parent: NavigationItemId },
}

fn join_ids(ids: &[NavigationItemId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// An item with its ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationNode {
    /// The item at this node.
    #[serde(flatten)]
    pub item: NavigationItemResponse,
    /// Children ordered by `(position, id)`.
    pub children: Vec<NavigationNode>,
}

/// The navigation trees of one website.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavigationForest {
    roots: Vec<NavigationNode>,
    #[serde(skip)]
    orphans: Vec<NavigationItemId>,
}

impl NavigationForest {
    /// Assemble trees from a flat list of one website's items.
    ///
    /// Items whose parent is missing from `items` become roots and are
    /// reported by [`orphans`](Self::orphans). Items that cannot reach a
    /// root because they sit on a loop fail the build.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use sitecraft::domain::{
    ///     NavigationForest, NavigationItem, NavigationItemCreate, NavigationItemId, WebsiteId,
    /// };
    ///
    /// let now = Utc::now();
    /// let site = WebsiteId::new(1);
    /// let home = NavigationItem::create(
///     NavigationItemId::new(1),
///     site,
///     NavigationItemCreate::link("Home", "/"),
///     now,
/// )
/// .unwrap();
    /// let team = NavigationItem::create(
    ///     NavigationItemId::new(2),
    ///     site,
    ///     NavigationItemCreate::link("Team", "/team").under(home.id),
    ///     now,
    /// )
    /// .unwrap();
    ///
    /// let forest = NavigationForest::build(vec![team, home]).unwrap();
    /// assert_eq!(forest.roots().len(), 1);
    /// assert_eq!(forest.roots()[0].children.len(), 1);
    /// ```
    pub fn build(items: Vec<NavigationItem>) -> Result<Self, NavigationError> {
        let known: BTreeSet<NavigationItemId> = items.iter().map(|item| item.id).collect();
        let mut orphans = Vec::new();
        let mut children: HashMap<Option<NavigationItemId>, Vec<NavigationItem>> = HashMap::new();

        for item in items {
            let parent = match item.parent_id {
                Some(parent) if known.contains(&parent) => Some(parent),
                Some(_) => {
                    orphans.push(item.id);
                    None
                }
                None => None,
            };
            children.entry(parent).or_default().push(item);
        }
        for siblings in children.values_mut() {
            siblings.sort_by_key(NavigationItem::order_key);
        }

        let roots = attach(None, &mut children);
        if !children.is_empty() {
            let mut ids: Vec<NavigationItemId> = children
                .into_values()
                .flatten()
                .map(|item| item.id)
                .collect();
            ids.sort_unstable();
            return Err(NavigationError::Cycle { ids });
        }
        orphans.sort_unstable();
        Ok(Self { roots, orphans })
    }

    /// Top-level nodes ordered by `(position, id)`.
    pub fn roots(&self) -> &[NavigationNode] {
        &self.roots
    }

    /// Items promoted to roots because their parent was missing.
    pub fn orphans(&self) -> &[NavigationItemId] {
        &self.orphans
    }

    /// Whether the forest has no items.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of items in every tree.
    pub fn len(&self) -> usize {
        self.flatten().len()
    }

    /// Depth-first `(depth, item)` pairs; roots have depth `0`.
    pub fn flatten(&self) -> Vec<(usize, &NavigationItemResponse)> {
        let mut out = Vec::new();
        let mut stack: Vec<(usize, &NavigationNode)> =
            self.roots.iter().rev().map(|node| (0, node)).collect();
        while let Some((depth, node)) = stack.pop() {
            out.push((depth, &node.item));
            stack.extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        }
        out
    }

    /// Copy of the forest without inactive items and their subtrees.
    pub fn active_only(&self) -> Self {
        Self {
            roots: prune_inactive(&self.roots),
            orphans: self.orphans.clone(),
        }
    }
}

fn attach(
    parent: Option<NavigationItemId>,
    children: &mut HashMap<Option<NavigationItemId>, Vec<NavigationItem>>,
) -> Vec<NavigationNode> {
    let Some(siblings) = children.remove(&parent) else {
        return Vec::new();
    };
    siblings
        .into_iter()
        .map(|item| {
            let nested = attach(Some(item.id), children);
            NavigationNode {
                item: NavigationItemResponse::from(&item),
                children: nested,
            }
        })
        .collect()
}

fn prune_inactive(nodes: &[NavigationNode]) -> Vec<NavigationNode> {
    nodes
        .iter()
        .filter(|node| node.item.is_active)
        .map(|node| NavigationNode {
            item: node.item.clone(),
            children: prune_inactive(&node.children),
        })
        .collect()
}

/// Check that placing `id` under `proposed_parent` keeps the hierarchy a
/// forest.
///
/// `items` holds every item of the website that owns `id`. The walk climbs
/// from the proposed parent towards the root; meeting `id` on the way means
/// the move would close a loop.
pub fn ensure_acyclic(
    items: &[NavigationItem],
    id: NavigationItemId,
    proposed_parent: Option<NavigationItemId>,
) -> Result<(), NavigationError> {
    let Some(parent) = proposed_parent else {
        return Ok(());
    };
    if parent == id {
        return Err(NavigationError::WouldCycle { id, parent });
    }
    let parents: BTreeMap<NavigationItemId, Option<NavigationItemId>> = items
        .iter()
        .map(|item| (item.id, item.parent_id))
        .collect();
    if !parents.contains_key(&parent) {
        return Err(NavigationError::ParentNotFound { parent });
    }

    let mut visited = BTreeSet::new();
    let mut cursor = Some(parent);
    while let Some(current) = cursor {
        if current == id {
            return Err(NavigationError::WouldCycle { id, parent });
        }
        if !visited.insert(current) {
            return Err(NavigationError::Cycle {
                ids: visited.into_iter().collect(),
            });
        }
        cursor = parents.get(&current).copied().flatten();
    }
    Ok(())
}
