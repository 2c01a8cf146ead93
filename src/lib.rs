//! Browser front end for the RPM lesson-plan generator.
//!
//! Serves the form, relays generation progress over server-sent events and
//! exports finished documents. All domain logic lives in `rpm-core`.

pub mod server;

pub use server::{AppState, build_router, serve};
