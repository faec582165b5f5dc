// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Runtime configuration of the service.

use car_rental_core::env::get_optional_var;
use derive_getters::Getters;

/// Default TCP port on which the service listens.
const DEFAULT_PORT: u16 = 8000;

/// Configuration of the service, obtained from environment variables.
#[derive(Clone, Debug, Getters, PartialEq)]
pub struct ServiceOptions {
    /// TCP port on which to listen for requests on all interfaces.
    port: u16,

    /// Whether to populate an empty catalog with sample cars at startup.
    seed_cars: bool,

    /// Path to a SQLite database to use instead of PostgreSQL.
    sqlite_path: Option<String>,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, seed_cars: false, sqlite_path: None }
    }
}

impl ServiceOptions {
    /// Creates a new set of options from environment variables whose name is prefixed with
    /// `prefix`.
    ///
    /// This will use variables such as `<prefix>_PORT`, `<prefix>_SEED_CARS` and
    /// `<prefix>_SQLITE_PATH`.  All of them are optional.
    pub fn from_env(prefix: &str) -> Result<ServiceOptions, String> {
        Ok(ServiceOptions {
            port: get_optional_var::<u16>(prefix, "PORT")?.unwrap_or(DEFAULT_PORT),
            seed_cars: get_optional_var::<bool>(prefix, "SEED_CARS")?.unwrap_or(false),
            sqlite_path: get_optional_var::<String>(prefix, "SQLITE_PATH")?,
        })
    }
}
