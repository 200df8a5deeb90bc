//! Parlor API Library Crate
//!
//! This library contains all the core logic for the Parlor provisioning
//! service: configuration, credential minting, the provisioning handler,
//! and routing. The `api` binary is a thin wrapper around this library.

pub mod config;
pub mod handlers;
pub mod models;
pub mod provision;
pub mod router;
pub mod state;
pub mod token;
