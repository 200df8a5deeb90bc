//! Latest-snapshot projections of the agent's published state.

use crate::{checkin::CheckInState, order::OrderState, update::UpdateEnvelope};
use std::sync::{Arc, Mutex, PoisonError};

/// A state kind that can be projected out of data-channel updates.
pub trait StateKind: Clone + Default + Send + 'static {
    /// The payload of `update` if the update is of this kind.
    fn from_update(update: &UpdateEnvelope) -> Option<&Self>;
}

impl StateKind for OrderState {
    fn from_update(update: &UpdateEnvelope) -> Option<&Self> {
        match update {
            UpdateEnvelope::Order(order) => Some(order),
            _ => None,
        }
    }
}

impl StateKind for CheckInState {
    fn from_update(update: &UpdateEnvelope) -> Option<&Self> {
        match update {
            UpdateEnvelope::CheckIn(checkin) => Some(checkin),
            _ => None,
        }
    }
}

/// Holds the latest snapshot of one state kind.
///
/// The snapshot starts as the all-null/empty default. `apply` replaces it
/// wholesale when an update matches this projector's kind and ignores
/// everything else, so the snapshot is always exactly the payload of the
/// most recent successfully decoded update of that kind.
#[derive(Clone, Default)]
pub struct Projector<S: StateKind> {
    snapshot: Arc<Mutex<S>>,
}

impl<S: StateKind> Projector<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the snapshot if `update` is of this projector's kind.
    pub fn apply(&self, update: &UpdateEnvelope) {
        if let Some(next) = S::from_update(update) {
            let mut snapshot = self
                .snapshot
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *snapshot = next.clone();
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> S {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
