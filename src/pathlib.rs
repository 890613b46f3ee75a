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

//! Path validation and parsing.
//!
//! A canonical folder path is either the literal `"/"` (the root) or a
//! string of the form `/c1/c2/.../cN/` where each `ci` is 1..=MAX_NAME
//! lowercase ASCII letters. This module owns all parsing so that every
//! other module can treat a `&str` path as already-validated once it has
//! passed [`is_valid`].

use crate::map::ChildMap;
use std::sync::Arc;

/// Maximum length, in bytes, of a single path component.
pub const MAX_NAME: usize = 255;

/// Returns true iff `path` is `"/"` or matches `(/[a-z]{1,MAX_NAME})+/`.
pub fn is_valid(path: &str) -> bool {
    if path == "/" {
        return true;
    }
    if !path.starts_with('/') || !path.ends_with('/') {
        return false;
    }
    // strip the single leading slash; splitting on '/' then yields one
    // empty string per separator plus one empty string for the trailing
    // slash, which we filter for validation but still require non-empty
    // components everywhere else.
    let body = &path[1..path.len() - 1];
    if body.is_empty() {
        return false;
    }
    body.split('/').all(is_valid_component)
}

fn is_valid_component(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_NAME
        && name.bytes().all(|b| b.is_ascii_lowercase())
}

/// Splits the first component off a non-root path, returning
/// `(component, rest)` where `rest` is the remaining path (still ending in
/// `/`, or `"/"` if `path` had exactly one component). Callers must have
/// already checked `path != "/"`.
pub fn split_first(path: &str) -> (&str, &str) {
    debug_assert!(path != "/");
    let body = &path[1..];
    let idx = body.find('/').expect("valid path ends in '/'");
    let component = &body[..idx];
    let rest = &body[idx + 1..];
    if rest.is_empty() {
        (component, "/")
    } else {
        (component, &path[idx + 1..])
    }
}

/// Splits a non-root valid path into `(parent_path, last_component)`.
pub fn parent_path(path: &str) -> (&str, &str) {
    debug_assert!(path != "/");
    let trimmed = &path[..path.len() - 1]; // drop trailing slash
    match trimmed.rfind('/') {
        Some(idx) => (&path[..idx + 1], &trimmed[idx + 1..]),
        None => unreachable!("valid non-root path always has a leading slash"),
    }
}

/// Returns true iff `a` is a path-component prefix of `b` (i.e. every
/// component of `a`, in order, is also a leading run of `b`'s components).
/// `is_prefix(a, a)` is true.
pub fn is_prefix(a: &str, b: &str) -> bool {
    if a == "/" {
        return true;
    }
    b.starts_with(a)
}

/// Longest common valid-path prefix of `a` and `b`, terminating at a
/// component boundary.
pub fn lca(a: &str, b: &str) -> String {
    let a_comps: Vec<&str> = components(a);
    let b_comps: Vec<&str> = components(b);
    let mut out = String::from("/");
    for (ca, cb) in a_comps.iter().zip(b_comps.iter()) {
        if ca == cb {
            out.push_str(ca);
            out.push('/');
        } else {
            break;
        }
    }
    out
}

fn components(path: &str) -> Vec<&str> {
    if path == "/" {
        Vec::new()
    } else {
        path[1..path.len() - 1].split('/').collect()
    }
}

/// Returns the suffix of `full` below `base`, re-rooted so it reads as its
/// own root-relative path (`"/"` if `full == base`). `base` must be a
/// path-component prefix of `full` (the caller's responsibility, typically
/// already established via [`lca`]).
pub fn relative_suffix<'a>(base: &str, full: &'a str) -> &'a str {
    debug_assert!(is_prefix(base, full));
    if base == "/" {
        full
    } else {
        &full[base.len() - 1..]
    }
}

/// Serializes the child names of `map` as an ascending, comma-joined listing
/// with no trailing comma and no spaces. Empty map yields the empty string.
pub fn listing_string(map: &ChildMap<String, Arc<crate::node::Node>>) -> String {
    let mut names: Vec<&String> = map.keys().collect();
    names.sort();
    names
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_root() {
        assert!(is_valid("/"));
    }

    #[test]
    fn validates_simple_paths() {
        assert!(is_valid("/a/"));
        assert!(is_valid("/a/b/c/"));
        assert!(!is_valid("/a"));
        assert!(!is_valid("a/"));
        assert!(!is_valid(""));
        assert!(!is_valid("/A/"));
        assert!(!is_valid("/a//b/"));
        assert!(!is_valid("/a_b/"));
    }

    #[test]
    fn max_name_boundary() {
        let ok = "a".repeat(MAX_NAME);
        let bad = "a".repeat(MAX_NAME + 1);
        assert!(is_valid(&format!("/{}/", ok)));
        assert!(!is_valid(&format!("/{}/", bad)));
    }

    #[test]
    fn split_first_walks_components() {
        assert_eq!(split_first("/a/b/c/"), ("a", "/b/c/"));
        assert_eq!(split_first("/a/"), ("a", "/"));
    }

    #[test]
    fn parent_path_splits_last_component() {
        assert_eq!(parent_path("/a/b/c/"), ("/a/b/", "c"));
        assert_eq!(parent_path("/a/"), ("/", "a"));
    }

    #[test]
    fn lca_terminates_on_component_boundary() {
        assert_eq!(lca("/a/b/", "/a/bc/"), "/a/");
        assert_eq!(lca("/a/x/", "/b/y/"), "/");
        assert_eq!(lca("/a/b/c/", "/a/b/"), "/a/b/");
    }

    #[test]
    fn relative_suffix_reroots_below_base() {
        assert_eq!(relative_suffix("/a/", "/a/b/c/"), "/b/c/");
        assert_eq!(relative_suffix("/", "/a/b/"), "/a/b/");
        assert_eq!(relative_suffix("/a/", "/a/"), "/");
    }

    #[test]
    fn is_prefix_checks_component_boundaries() {
        assert!(is_prefix("/a/", "/a/b/"));
        assert!(is_prefix("/", "/a/b/"));
        assert!(!is_prefix("/a/", "/ab/"));
        assert!(is_prefix("/a/", "/a/"));
    }
}
