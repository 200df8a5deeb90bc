//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds all shared,
//! clonable resources passed to the handlers.

use crate::config::Config;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all
/// handlers. Provisioning is stateless, so configuration is all it carries.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}
