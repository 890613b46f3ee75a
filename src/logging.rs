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

//! Logger initialization, reading filters from the `NSD_LOG` environment
//! variable.

use crate::config::LOG_ENV_VAR;
use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes `env_logger` reading filters from `NSD_LOG`, defaulting to
/// `info`. Safe to call more than once; only the first call takes effect.
pub fn init() {
    INIT.call_once(|| {
        env_logger::Builder::new()
            .parse_filters(&env::var(LOG_ENV_VAR).unwrap_or_else(|_| "info".to_owned()))
            .init();
    });
}
