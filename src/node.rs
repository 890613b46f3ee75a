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

//! `NODE`: a folder object.
//!
//! Each node owns its children (the ownership edge, `parent -> child`) and
//! carries a non-owning `parent` back-reference used only to walk upward
//! when releasing a path lock. Mutation of `children` and `parent` is
//! guarded entirely by the embedded [`Room`], not by a second lock around
//! the data. The invariant is: nobody touches `children` or `parent` without
//! first having taken the matching hold on `room`.

use crate::map::ChildMap;
use crate::room::Room;
use std::cell::UnsafeCell;
use std::sync::{Arc, Weak};

#[derive(Debug)]
pub struct Node {
    children: UnsafeCell<ChildMap<String, Arc<Node>>>,
    parent: UnsafeCell<Weak<Node>>,
    pub room: Room,
}

// Safety: every access to `children`/`parent` through the methods below is
// made only while the caller holds the corresponding reader or writer hold
// on `room` (enforced by `PathLock` and `FolderTree`'s move logic).
unsafe impl Send for Node {}
unsafe impl Sync for Node {}

impl Node {
    /// Constructs a fresh, detached, empty node.
    pub fn new_detached() -> Arc<Node> {
        Arc::new(Node {
            children: UnsafeCell::new(ChildMap::new()),
            parent: UnsafeCell::new(Weak::new()),
            room: Room::new(),
        })
    }

    /// Borrows the children map. Caller must hold at least a reader hold on
    /// `room`.
    pub fn children(&self) -> &ChildMap<String, Arc<Node>> {
        unsafe { &*self.children.get() }
    }

    /// Mutably borrows the children map. Caller must hold the writer hold
    /// on `room`.
    #[allow(clippy::mut_from_ref)]
    pub fn children_mut(&self) -> &mut ChildMap<String, Arc<Node>> {
        unsafe { &mut *self.children.get() }
    }

    /// Reads the parent back-reference. Caller must hold at least a reader
    /// hold on `room` on *this* node, or know by construction that no
    /// concurrent writer can reach it (e.g. a node a caller just allocated
    /// and has not yet published).
    pub fn parent(&self) -> Weak<Node> {
        unsafe { (*self.parent.get()).clone() }
    }

    /// Overwrites the parent back-reference. Called by `create` and `move`,
    /// each while holding a writer hold on the node that owns the child slot
    /// being created or transferred (the inserting parent, or the LCA), not
    /// necessarily on `self`. That ancestor's writer hold is what makes this
    /// write race-free: nobody else can be reading or writing `self.parent`
    /// concurrently because reaching `self` at all requires passing through
    /// the locked ancestor.
    pub fn set_parent(&self, new_parent: Weak<Node>) {
        unsafe {
            *self.parent.get() = new_parent;
        }
    }

    /// Number of direct children. Caller must hold at least a reader hold.
    pub fn child_count(&self) -> usize {
        self.children().len()
    }
}
