//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin shim (`main.rs`) and the store, transport and
//! worker layers. Data flows one way:
//!
//! ```text
//! Keys / command results / worker replies → Event → handle_event
//!     → AppState mutations (store via reducer only) → Actions → host calls
//!                ↑                                          ↓
//!                └────── RequestFinished / WorkerResponse ──┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects for the shim to execute
//! - [`dispatch`]: settles finished calls into store events
//! - [`form`]: the create/edit form state machine
//! - [`handler`]: event processing and flow coordination
//! - [`modes`]: focus and form-mode types
//! - [`state`]: the state container and view model computation

pub mod actions;
pub mod dispatch;
pub mod form;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use form::FormState;
pub use handler::{handle_event, Event};
pub use modes::{Focus, FormField, FormMode};
pub use state::AppState;
