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

//! REST service to book rental cars.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use car_rental_core::clocks::SystemClock;
use car_rental_core::db::Db;
use log::{info, warn};
use std::error::Error;
use std::net::Ipv4Addr;
use std::sync::Arc;

mod db;
mod driver;
use driver::Driver;
pub(crate) mod model;
pub mod options;
use options::ServiceOptions;
mod rest;
use rest::app;

/// Instantiates all resources to serve the application on the port configured in `opts`, using
/// `db` for persistence.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(
    opts: ServiceOptions,
    db: Arc<dyn Db + Send + Sync>,
) -> Result<(), Box<dyn Error>> {
    db::init_schema(&mut db.ex().await?).await?;

    let driver = Driver::new(db.clone(), Arc::new(SystemClock::default()));
    if *opts.seed_cars() {
        driver.clone().seed_cars().await?;
    }

    let listener = tokio::net::TcpListener::bind((Ipv4Addr::UNSPECIFIED, *opts.port())).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app(driver))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Cannot wait for Ctrl-C; shutdown will not be graceful: {}", e);
                futures::future::pending::<()>().await;
            }
            info!("Shutting down");
        })
        .await?;

    db.close().await;
    Ok(())
}
