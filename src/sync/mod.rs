//! History and store synchronization.
//!
//! This is the imperative shell around the pure core: it wires a
//! [`History`](crate::history::History) and a [`Store`](crate::store::Store)
//! together so that every history change becomes a dispatched action and
//! every `PUSH`/`REPLACE` navigation becomes a history change, without
//! feedback between the two.
//!
//! # Key Pieces
//!
//! - **Navigation middleware**: attaches the computed location to route actions
//! - **Enhancer**: writes navigations to history and listens for external changes
//! - **Echo guard**: marks the window in which a history change is dispatched
//! - **Deferred effects**: environment writes (the title) applied on a later tick
//! - **Binding**: the most recent store's dispatch and history, for [`crate::api`]

mod binding;
mod deferred;
mod echo;
mod enhancer;
pub mod error;
mod middleware;

pub use binding::{current_binding, reset_binding, EnhancerBinding};
pub use deferred::{
    DeferredEffects, DocumentTitle, EffectTarget, Environment, PendingEffect, Scheduler, Task,
    TickQueue, TitleTarget,
};
pub use echo::{EchoGuard, EchoState};
pub use enhancer::{history_enhancer, SyncConfig, TitleSelector};
pub use error::NavigationError;
pub use middleware::{enrich, navigation_middleware, resolve_snapshot, LocationSelector};
