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

//! Entry point to the car rental service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use car_rental::options::ServiceOptions;
use car_rental::serve;
use car_rental_core::db::Db;
use car_rental_core::db::postgres::{PostgresDb, PostgresOptions};
use std::error::Error;
use std::sync::Arc;

/// Connects to the database selected by `opts`.
async fn connect_db(opts: &ServiceOptions) -> Result<Arc<dyn Db + Send + Sync>, Box<dyn Error>> {
    match opts.sqlite_path() {
        Some(path) => {
            log::info!("Using SQLite database {}", path);
            Ok(Arc::new(car_rental_core::db::sqlite::connect(path).await?))
        }
        None => {
            let db_opts = PostgresOptions::from_env("PGSQL_PROD")?;
            Ok(Arc::new(PostgresDb::connect(db_opts)?))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let opts = ServiceOptions::from_env("RENTALS")?;
    let db = connect_db(&opts).await?;
    serve(opts, db).await
}
