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

//! `nsd`: a command-line front-end over [`nsd::tree::FolderTree`]. Logger
//! init, then a fallible `run()` that `main` unwraps into an exit code.

use clap::Parser;
use nsd::cli::{Cli, Command};
use nsd::config::BenchConfig;
use nsd::error::NsError;
use nsd::terminal;
use nsd::tree::FolderTree;
use std::io::{self, BufRead};
use std::process;
use std::sync::Arc;

fn main() {
    nsd::logging::init();
    if let Err(e) = run() {
        let _ = terminal::write_error(format!("nsd exited with error: {e}\n"));
        process::exit(0x01);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let tree = FolderTree::new();
    match cli.command {
        Command::List { path } => report(tree.list(&path)),
        Command::Create { path } => report(tree.create(&path).map(|_| String::new())),
        Command::Remove { path } => report(tree.remove(&path).map(|_| String::new())),
        Command::Move { source, target } => {
            report(tree.move_(&source, &target).map(|_| String::new()))
        }
        Command::Repl => repl(&tree),
        Command::Bench { threads, ops } => {
            let mut cfg = BenchConfig::default();
            if let Some(t) = threads {
                cfg.threads = t;
            }
            if let Some(o) = ops {
                cfg.ops_per_thread = o;
            }
            let report = nsd::bench::run(Arc::new(tree), cfg);
            let _ = terminal::write_info(format!(
                "{} threads x {} ops/thread = {} total ops in {:?}\n",
                report.threads,
                report.ops_per_thread,
                report.total_ops,
                report.elapsed.unwrap_or_default()
            ));
            Ok(())
        }
    }
}

/// Reads one command per line from stdin (`list <path>`, `create <path>`,
/// `remove <path>`, `move <source> <target>`) and applies each to `tree`,
/// printing its result, until EOF.
fn repl(tree: &FolderTree) -> Result<(), String> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| e.to_string())?;
        let words: Vec<&str> = line.split_whitespace().collect();
        let outcome = match words.as_slice() {
            ["list", path] => tree.list(path),
            ["create", path] => tree.create(path).map(|_| String::new()),
            ["remove", path] => tree.remove(path).map(|_| String::new()),
            ["move", source, target] => tree.move_(source, target).map(|_| String::new()),
            [] => continue,
            _ => {
                let _ = terminal::write_error(format!("unrecognized command: {line}\n"));
                continue;
            }
        };
        match outcome {
            Ok(text) if text.is_empty() => {
                let _ = terminal::write_success("OK\n");
            }
            Ok(text) => {
                let _ = terminal::write_success(format!("{text}\n"));
            }
            Err(e) => {
                let _ = terminal::write_error(format!("{}\n", error_code(e)));
            }
        }
    }
    Ok(())
}

fn report(result: Result<String, NsError>) -> Result<(), String> {
    match result {
        Ok(text) => {
            if !text.is_empty() {
                let _ = terminal::write_success(format!("{text}\n"));
            } else {
                let _ = terminal::write_success("OK\n");
            }
            Ok(())
        }
        Err(e) => {
            let _ = terminal::write_error(format!("{}\n", error_code(e)));
            Err(e.to_string())
        }
    }
}

/// The stable, non-overlapping wire code for each error kind.
fn error_code(e: NsError) -> &'static str {
    match e {
        NsError::Invalid => "INVALID",
        NsError::Noent => "NOENT",
        NsError::Exists => "EXISTS",
        NsError::Notempty => "NOTEMPTY",
        NsError::Busy => "BUSY",
        NsError::MoveIntoSelf => "MOVE_INTO_SELF",
    }
}
