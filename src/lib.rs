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

//! `nsd`: a concurrent in-memory folder namespace.
//!
//! The core synchronization discipline (path locking, the per-node
//! readers/writers room, and the least-common-ancestor locking strategy
//! used by `move`) lives in [`room`], [`node`], [`pathlock`] and [`tree`].
//! Everything else ([`config`], [`logging`], [`cli`], [`bench`]) is the
//! ambient surface around it.

pub mod bench;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod map;
pub mod node;
pub mod pathlib;
pub mod pathlock;
pub mod room;
pub mod terminal;
pub mod tree;

pub use error::{NsError, NsResult};
pub use tree::FolderTree;
