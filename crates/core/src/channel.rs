//! Fan-out of inbound data-channel frames to subscribed listeners.

use crate::{
    projector::{Projector, StateKind},
    update::UpdateEnvelope,
};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tracing::{debug, warn};

type Listener = Arc<Mutex<dyn FnMut(&UpdateEnvelope) + Send>>;

#[derive(Default)]
struct ListenerTable {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

impl ListenerTable {
    fn remove(&mut self, id: u64) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }
}

/// Fan-out point for inbound data-channel frames.
///
/// The transport hands each raw frame to [`DataChannel::publish_raw`]; live
/// subscribers receive every successfully decoded update in registration
/// order. Malformed frames are logged and dropped here so that one bad
/// message never unwinds into the transport's delivery callback or disturbs
/// delivery of the next.
#[derive(Clone, Default)]
pub struct DataChannel {
    table: Arc<Mutex<ListenerTable>>,
}

/// Registration handle returned by [`DataChannel::subscribe`].
///
/// Dropping the handle deregisters the listener, so a torn-down viewer stops
/// receiving callbacks on every exit path and a later session never sees
/// stale listeners from an earlier one.
#[must_use = "dropping the subscription immediately detaches the listener"]
pub struct Subscription {
    id: u64,
    table: Weak<Mutex<ListenerTable>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            table
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(self.id);
        }
    }
}

impl DataChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for every decoded update until the returned
    /// handle is dropped.
    pub fn subscribe(
        &self,
        listener: impl FnMut(&UpdateEnvelope) + Send + 'static,
    ) -> Subscription {
        let listener: Listener = Arc::new(Mutex::new(listener));
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        let id = table.next_id;
        table.next_id += 1;
        table.listeners.push((id, listener));
        Subscription {
            id,
            table: Arc::downgrade(&self.table),
        }
    }

    /// Feeds `projector` from this channel for the lifetime of the returned
    /// handle.
    pub fn attach<S: StateKind>(&self, projector: &Projector<S>) -> Subscription {
        let projector = projector.clone();
        self.subscribe(move |update| projector.apply(update))
    }

    /// Decodes one raw frame and delivers it to the current subscribers.
    ///
    /// Unknown update kinds are still delivered (projectors ignore them);
    /// undecodable frames are dropped after logging.
    pub fn publish_raw(&self, raw: &[u8]) {
        let update = match UpdateEnvelope::decode(raw) {
            Ok(update) => update,
            Err(err) => {
                warn!(error = %err, len = raw.len(), "dropping undecodable data-channel frame");
                return;
            }
        };
        if let UpdateEnvelope::Unknown(kind) = &update {
            debug!(%kind, "delivering data-channel update of unknown kind");
        }

        // Deliver against a snapshot of the table so a listener may
        // subscribe or drop its own handle from inside the callback.
        let listeners: Vec<Listener> = {
            let table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
            table
                .listeners
                .iter()
                .map(|(_, listener)| listener.clone())
                .collect()
        };
        for listener in listeners {
            let mut listener = listener.lock().unwrap_or_else(PoisonError::into_inner);
            (*listener)(&update);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{checkin::CheckInState, order::OrderState};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ORDER_FRAME: &[u8] =
        br#"{"type":"order_update","order":{"drinkType":"latte","name":"Sam"}}"#;
    const CHECKIN_FRAME: &[u8] =
        br#"{"type":"checkin_update","checkin":{"mood":"good","objectives":["stretch"]}}"#;

    #[test]
    fn delivers_decoded_updates_to_subscribers() {
        let channel = DataChannel::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let seen_by_listener = seen.clone();
        let _subscription = channel.subscribe(move |update| {
            assert_eq!(update.kind(), "order_update");
            seen_by_listener.fetch_add(1, Ordering::SeqCst);
        });

        channel.publish_raw(ORDER_FRAME);
        channel.publish_raw(ORDER_FRAME);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn malformed_frames_do_not_poison_later_ones() {
        let channel = DataChannel::new();
        let projector = Projector::<OrderState>::new();
        let _subscription = channel.attach(&projector);

        channel.publish_raw(&[0xff, 0x00, 0x9f]);
        channel.publish_raw(b"{truncated");
        channel.publish_raw(br#"{"no_type_here":true}"#);

        assert_eq!(projector.snapshot(), OrderState::default());

        // A well-formed frame right after the garbage still applies.
        channel.publish_raw(ORDER_FRAME);
        assert_eq!(projector.snapshot().drink_type.as_deref(), Some("latte"));
    }

    #[test]
    fn projectors_only_see_their_own_kind() {
        let channel = DataChannel::new();
        let order = Projector::<OrderState>::new();
        let checkin = Projector::<CheckInState>::new();
        let _order_subscription = channel.attach(&order);
        let _checkin_subscription = channel.attach(&checkin);

        channel.publish_raw(ORDER_FRAME);
        channel.publish_raw(CHECKIN_FRAME);

        assert_eq!(order.snapshot().name.as_deref(), Some("Sam"));
        assert_eq!(order.snapshot().extras, Vec::<String>::new());
        assert_eq!(checkin.snapshot().mood.as_deref(), Some("good"));
        assert_eq!(checkin.snapshot().objectives, vec!["stretch".to_string()]);
    }

    #[test]
    fn dropped_subscriptions_see_nothing_further() {
        let channel = DataChannel::new();
        let projector = Projector::<OrderState>::new();

        let subscription = channel.attach(&projector);
        channel.publish_raw(ORDER_FRAME);
        assert_eq!(projector.snapshot().drink_type.as_deref(), Some("latte"));

        drop(subscription);
        channel.publish_raw(
            br#"{"type":"order_update","order":{"drinkType":"espresso"}}"#,
        );
        assert_eq!(projector.snapshot().drink_type.as_deref(), Some("latte"));
    }

    #[test]
    fn unknown_kinds_reach_listeners_but_not_projectors() {
        let channel = DataChannel::new();
        let projector = Projector::<OrderState>::new();
        let kinds = Arc::new(Mutex::new(Vec::new()));

        let _projector_subscription = channel.attach(&projector);
        let kinds_seen = kinds.clone();
        let _listener_subscription = channel.subscribe(move |update| {
            kinds_seen.lock().unwrap().push(update.kind().to_string());
        });

        channel.publish_raw(br#"{"type":"presence_update","who":"agent"}"#);

        assert_eq!(projector.snapshot(), OrderState::default());
        assert_eq!(*kinds.lock().unwrap(), vec!["presence_update".to_string()]);
    }
}
