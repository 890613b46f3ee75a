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

//! Error kinds returned by [`crate::tree::FolderTree`] operations.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NsError {
    /// Any argument path failed `pathlib` validation.
    Invalid,
    /// A required intermediate or terminal folder does not exist.
    Noent,
    /// The target of `create`/`move` already exists, or `create("/")`.
    Exists,
    /// `remove` was called on a non-empty folder.
    Notempty,
    /// `remove("/")` or `move` with source `"/"`.
    Busy,
    /// `move` where `source` is a strict proper prefix of `target`.
    MoveIntoSelf,
}

impl fmt::Display for NsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::Invalid => "invalid path",
            Self::Noent => "no such folder",
            Self::Exists => "folder already exists",
            Self::Notempty => "folder is not empty",
            Self::Busy => "operation not permitted on the root",
            Self::MoveIntoSelf => "cannot move a folder into its own subtree",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for NsError {}

pub type NsResult<T> = Result<T, NsError>;
