//! Terminal rendering for the plugin pane.
//!
//! Rendering is declarative: the app layer computes a [`UIViewModel`] from
//! its state and the components only draw it.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: renderable UI state
//! - [`renderer`]: top-level entry point
//! - [`components`]: header, form, cards, placeholder, alert, footer
//! - [`helpers`]: cursor and padding utilities
//! - [`theme`]: color schemes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::{Theme, ThemeColors};
pub use viewmodel::{AlertInfo, EmptyState, FieldView, FooterInfo, FormView, HeaderInfo, PostCard, UIViewModel};
