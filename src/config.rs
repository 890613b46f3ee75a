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

//! Configuration surface: CLI flags with environment-variable fallbacks.
//!
//! Layering is CLI argument, then environment variable, then a built-in
//! default. `nsd` has no network surface and no config file, so the
//! layering collapses to two sources.

use std::env;
use std::str::FromStr;

/// Name of the environment variable controlling log verbosity, read by
/// [`crate::logging::init`].
pub const LOG_ENV_VAR: &str = "NSD_LOG";

/// Reads an environment variable and parses it, falling back to `default`
/// if absent or unparseable.
pub fn env_or<T: FromStr>(var: &str, default: T) -> T {
    env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Defaults for the concurrent stress harness (32 threads each performing
/// 10^4 random valid operations).
#[derive(Debug, Clone, Copy)]
pub struct BenchConfig {
    pub threads: usize,
    pub ops_per_thread: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            threads: env_or("NSD_BENCH_THREADS", 32),
            ops_per_thread: env_or("NSD_BENCH_OPS", 10_000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_falls_back_to_default_when_unset() {
        assert_eq!(env_or::<usize>("NSD_DEFINITELY_UNSET_VAR", 7), 7);
    }
}
