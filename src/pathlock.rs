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

//! `PATHLOCK`: path descent with progressive locking.
//!
//! Walks `path` from `root`, taking a reader hold at every node strictly
//! above the terminal, then a reader or writer hold (per `terminal_mode`) at
//! the terminal itself. If a component is missing partway through, the chain
//! accumulated so far (all reader holds) is still returned so the caller can
//! release it uniformly.

use crate::node::Node;
use crate::pathlib;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldMode {
    Read,
    Write,
}

/// The held chain from a path descent. Releasing happens automatically on
/// drop (reverse order, terminal entry released per its recorded mode,
/// every other entry released as a reader).
pub struct PathLock {
    chain: Vec<(Arc<Node>, HoldMode)>,
    complete: bool,
}

impl PathLock {
    /// Descends `path` from `root`, acquiring reader holds at every
    /// ancestor and the terminal hold in `terminal_mode`. The empty path
    /// (`"/"`) resolves to the root with no ancestor reads, just the
    /// terminal hold on the root.
    pub fn acquire(root: &Arc<Node>, path: &str, terminal_mode: HoldMode) -> PathLock {
        let mut chain = Vec::new();
        let mut cur = root.clone();
        let mut rest = path;

        while rest != "/" {
            let (component, tail) = pathlib::split_first(rest);
            cur.room.enter_read();
            let next = cur.children().get(component).cloned();
            chain.push((cur.clone(), HoldMode::Read));
            match next {
                Some(child) => {
                    cur = child;
                    rest = tail;
                }
                None => {
                    return PathLock {
                        chain,
                        complete: false,
                    };
                }
            }
        }

        match terminal_mode {
            HoldMode::Read => cur.room.enter_read(),
            HoldMode::Write => cur.room.enter_write(),
        }
        chain.push((cur, terminal_mode));
        PathLock {
            chain,
            complete: true,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The terminal node, if descent reached it.
    pub fn terminal(&self) -> Option<&Arc<Node>> {
        if self.complete {
            self.chain.last().map(|(n, _)| n)
        } else {
            None
        }
    }

    /// Explicit release, for call sites that want the release point to read
    /// as part of the operation's control flow. Equivalent to dropping the
    /// handle.
    pub fn release(self) {
        drop(self)
    }
}

impl Drop for PathLock {
    fn drop(&mut self) {
        for (node, mode) in self.chain.drain(..).rev() {
            match mode {
                HoldMode::Read => node.room.leave_read(),
                HoldMode::Write => node.room.leave_write(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_locks_only_root() {
        let root = Node::new_detached();
        let lock = PathLock::acquire(&root, "/", HoldMode::Read);
        assert!(lock.is_complete());
        assert!(Arc::ptr_eq(lock.terminal().unwrap(), &root));
    }

    #[test]
    fn missing_component_returns_incomplete_chain() {
        let root = Node::new_detached();
        let lock = PathLock::acquire(&root, "/a/b/", HoldMode::Read);
        assert!(!lock.is_complete());
        assert!(lock.terminal().is_none());
    }

    #[test]
    fn descent_reaches_existing_child() {
        let root = Node::new_detached();
        let child = Node::new_detached();
        root.room.enter_write();
        root.children_mut().insert_if_absent("a".into(), child.clone());
        root.room.leave_write();

        let lock = PathLock::acquire(&root, "/a/", HoldMode::Write);
        assert!(lock.is_complete());
        assert!(Arc::ptr_eq(lock.terminal().unwrap(), &child));
    }
}
