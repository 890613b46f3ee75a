/*
 * This file is a part of nsd
 * nsd is a free and open-source concurrent in-memory folder namespace
 * maintained by the nsd contributors.
 *
 * Copyright (c) 2024, nsd contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 *
*/

//! `OPS`: the five public operations over the folder namespace.
//!
//! Control flow for every operation: validate inputs, compute the locking
//! plan, descend with [`PathLock`], mutate or read the terminal node's map,
//! release. `move_` additionally implements the least-common-ancestor
//! locking strategy.

use crate::error::{NsError, NsResult};
use crate::node::Node;
use crate::pathlib;
use crate::pathlock::{HoldMode, PathLock};
use std::sync::Arc;

/// A concurrent in-memory folder namespace. Cheaply cloneable (clones just
/// the `Arc<Node>` root) if callers want to share one tree across threads
/// without an outer `Arc<FolderTree>`.
#[derive(Clone)]
pub struct FolderTree {
    root: Arc<Node>,
}

impl FolderTree {
    /// `new`: an empty tree with just the root.
    pub fn new() -> Self {
        log::debug!("created new empty folder tree");
        Self {
            root: Node::new_detached(),
        }
    }

    /// `list(path)`: a comma-joined, sorted listing of `path`'s direct
    /// children.
    pub fn list(&self, path: &str) -> NsResult<String> {
        if !pathlib::is_valid(path) {
            return Err(NsError::Invalid);
        }
        let lock = PathLock::acquire(&self.root, path, HoldMode::Read);
        if !lock.is_complete() {
            return Err(NsError::Noent);
        }
        let listing = pathlib::listing_string(lock.terminal().unwrap().children());
        log::trace!("list {} -> \"{}\"", path, listing);
        Ok(listing)
    }

    /// `create(path)`: adds an empty folder at `path`.
    pub fn create(&self, path: &str) -> NsResult<()> {
        if !pathlib::is_valid(path) {
            return Err(NsError::Invalid);
        }
        if path == "/" {
            return Err(NsError::Exists);
        }
        let (parent_path, new_name) = pathlib::parent_path(path);
        let lock = PathLock::acquire(&self.root, parent_path, HoldMode::Write);
        if !lock.is_complete() {
            return Err(NsError::Noent);
        }
        let parent = lock.terminal().unwrap();
        let fresh = Node::new_detached();
        if parent
            .children_mut()
            .insert_if_absent(new_name.to_string(), fresh.clone())
        {
            fresh.set_parent(Arc::downgrade(parent));
            log::debug!("create {} -> ok", path);
            Ok(())
        } else {
            // `fresh` was never published anywhere; it's simply dropped.
            log::debug!("create {} -> exists", path);
            Err(NsError::Exists)
        }
    }

    /// `remove(path)`: removes an empty folder at `path`.
    pub fn remove(&self, path: &str) -> NsResult<()> {
        if !pathlib::is_valid(path) {
            return Err(NsError::Invalid);
        }
        if path == "/" {
            return Err(NsError::Busy);
        }
        let (parent_path, victim_name) = pathlib::parent_path(path);
        let lock = PathLock::acquire(&self.root, parent_path, HoldMode::Write);
        if !lock.is_complete() {
            return Err(NsError::Noent);
        }
        let parent = lock.terminal().unwrap();
        let victim = match parent.children().get(victim_name) {
            Some(v) => v.clone(),
            None => return Err(NsError::Noent),
        };
        if victim.child_count() != 0 {
            return Err(NsError::Notempty);
        }
        parent.children_mut().remove(victim_name);
        log::debug!("remove {} -> ok", path);
        Ok(())
        // `victim` (and `lock`) drop here: the node's room has no
        // outstanding holders, so it is safe to free once its strong count
        // reaches zero.
    }

    /// `move(source, target)`: re-parents the folder at `source` to
    /// `target`, locking only the least common ancestor of the two paths.
    pub fn move_(&self, source: &str, target: &str) -> NsResult<()> {
        if !pathlib::is_valid(source) || !pathlib::is_valid(target) {
            return Err(NsError::Invalid);
        }
        if source == "/" {
            return Err(NsError::Busy);
        }
        if target == "/" {
            return Err(NsError::Exists);
        }
        if source != target && pathlib::is_prefix(source, target) {
            return Err(NsError::MoveIntoSelf);
        }

        let lca_path = pathlib::lca(source, target);
        let lock = PathLock::acquire(&self.root, &lca_path, HoldMode::Write);
        if !lock.is_complete() {
            return Err(NsError::Noent);
        }
        let lca_node = lock.terminal().unwrap();

        if source == target {
            log::debug!("move {} -> {} (no-op)", source, target);
            return Ok(());
        }

        let suffix_source = pathlib::relative_suffix(&lca_path, source);
        let (source_parent_suffix, source_name) = pathlib::parent_path(suffix_source);
        let source_parent = match resolve_within(lca_node, source_parent_suffix) {
            Some(n) => n,
            None => return Err(NsError::Noent),
        };
        let victim = match source_parent.children().get(source_name) {
            Some(v) => v.clone(),
            None => return Err(NsError::Noent),
        };

        let suffix_target = pathlib::relative_suffix(&lca_path, target);
        if suffix_target == "/" {
            // `target` is itself the LCA: it necessarily already exists,
            // since descent just reached it.
            log::debug!("move {} -> {} -> exists", source, target);
            return Err(NsError::Exists);
        }
        let (target_parent_suffix, target_name) = pathlib::parent_path(suffix_target);
        let target_parent = match resolve_within(lca_node, target_parent_suffix) {
            Some(n) => n,
            None => return Err(NsError::Noent),
        };

        if !target_parent
            .children_mut()
            .insert_if_absent(target_name.to_string(), victim.clone())
        {
            log::debug!("move {} -> {} -> exists", source, target);
            return Err(NsError::Exists);
        }
        victim.set_parent(Arc::downgrade(&target_parent));
        source_parent.children_mut().remove(source_name);
        log::debug!("move {} -> {} -> ok", source, target);
        Ok(())
    }
}

impl Default for FolderTree {
    fn default() -> Self {
        Self::new()
    }
}

/// `free`: realized as ordinary recursive `Arc`/`HashMap` drop glue. Once the
/// last reference to a node goes away its `children` map drops each child in
/// turn, which drops their own `Room`s and children recursively. No node's
/// `room` is ever dropped while holds are outstanding, because a node
/// becomes unreachable (and so loses its last strong reference) only after
/// `remove` has verified no concurrent operation can still reach it.
impl Drop for FolderTree {
    fn drop(&mut self) {
        log::debug!("dropping folder tree");
    }
}

/// Ordinary (unsynchronized) traversal within a subtree already held by a
/// writer lock at its root. `suffix` is root-relative (`"/"`, `"/x/"`, ...).
fn resolve_within(start: &Arc<Node>, suffix: &str) -> Option<Arc<Node>> {
    let mut cur = start.clone();
    let mut rest = suffix;
    while rest != "/" {
        let (component, tail) = pathlib::split_first(rest);
        cur = cur.children().get(component)?.clone();
        rest = tail;
    }
    Some(cur)
}
