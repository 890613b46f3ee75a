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

//! `clap`-derived command-line surface over [`crate::tree::FolderTree`].

use clap::{Parser, Subcommand};

const HELP_TEMPLATE: &str = r#"
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
"#;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "A concurrent in-memory folder namespace",
    long_about = None,
    help_template = HELP_TEMPLATE
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the direct children of a folder.
    List {
        /// Folder path, e.g. "/a/b/".
        path: String,
    },
    /// Create an empty folder.
    Create {
        /// Folder path, e.g. "/a/b/".
        path: String,
    },
    /// Remove an empty folder.
    Remove {
        /// Folder path, e.g. "/a/b/".
        path: String,
    },
    /// Move (rename/re-parent) a folder.
    Move {
        /// Existing folder path.
        source: String,
        /// Destination folder path.
        target: String,
    },
    /// Run a sequence of subcommands read one-per-line from stdin, against a
    /// single shared tree, until EOF. Intended for scripting and for the
    /// integration tests that drive the binary as a subprocess.
    Repl,
    /// Run the concurrent stress harness.
    Bench {
        /// Number of worker threads.
        #[arg(long)]
        threads: Option<usize>,
        /// Operations performed by each worker thread.
        #[arg(long)]
        ops: Option<usize>,
    },
}
