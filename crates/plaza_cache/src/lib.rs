//! # Plaza Cache
//!
//! Local caches and sync producers for the Plaza SDK.
//!
//! This crate provides:
//! - The write-side caches the application enqueues into ([`PostStore`],
//!   [`UserActionCache`], [`UserCache`], [`ActivityCache`],
//!   [`PushRegistrationStore`])
//! - The [`Syncable`] contract records implement and the generic
//!   [`QueueProducer`]/[`QueueSyncAdapter`] bridge into the synchronizer
//! - [`standard_sync_handler`] wiring every cache in the canonical order
//!
//! Caches queue user intents while offline; the synchronization pass drains
//! them once the server confirms each action.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod activity;
mod adapter;
mod post;
mod push;
mod user;
mod user_action;
mod wiring;

pub use activity::{ActivityCache, ActivityReadAction};
pub use adapter::{QueueProducer, QueueSyncAdapter, Syncable};
pub use post::{PendingDiscussionItem, PendingPost, PendingTopicEdit, PostStore};
pub use push::{PushRegistrationAction, PushRegistrationStore};
pub use user::{RelationshipAction, UserCache};
pub use user_action::{
    ContentRemovalAction, HideTopicAction, LikeAction, PinAction, ReportContentAction,
    UserActionCache,
};
pub use wiring::{labels, register_standard_producers, standard_sync_handler, CacheSet};
