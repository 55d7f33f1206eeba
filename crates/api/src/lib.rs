//! # Complexity Analyzer API Server
//!
//! REST front end for the analysis engine. A request carries source code and
//! its language; the response carries the model's Big-O classification plus
//! the timings measured by running the generated benchmark.
//!
//! ## Endpoints
//!
//! - **POST** `/api/analyze` - Classify code and benchmark it
//! - **GET** `/health` - Liveness plus model/credential status
//! - **GET** `/api-doc/openapi.json` - OpenAPI document
//!
//! ## Error Handling
//!
//! Failures come back as [`ErrorResponse`] JSON. Input problems are `400`,
//! configuration and model service problems are `500`. A failed benchmark is
//! not an error: the result is returned with an empty `performanceData`.

pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod types;

pub use server::{ApiServer, AppState};
pub use types::*;
