//! Viewer-side state synchronization for Parlor realtime rooms.
//!
//! An agent participant publishes full state snapshots as JSON frames over
//! the room data channel. This crate decodes those frames and keeps a
//! per-kind projection of the latest state for display: a drink order, a
//! wellness check-in. The realtime transport itself (rooms, media, delivery)
//! is an external collaborator; it only needs to hand raw frames to a
//! [`channel::DataChannel`].

pub mod channel;
pub mod checkin;
pub mod order;
pub mod projector;
pub mod update;
