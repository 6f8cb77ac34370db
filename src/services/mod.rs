//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own lookup logic and persistence concerns so route
//! handlers can stay focused on protocol translation and auth plumbing.
//! Auth and profile access sit behind trait objects; the Postgres-backed
//! implementations here are the production wiring.

pub mod appointments;
pub mod auth;
pub mod profile;
