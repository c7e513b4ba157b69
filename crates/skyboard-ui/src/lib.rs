//! Host-agnostic dashboard layer.
//!
//! The host owns the event loop and the pixels. It feeds the three input
//! events into a [`DashboardController`], polls it for finished fetches, and
//! renders the [`DashboardView`] tree it gets back.

pub mod error_mapping;
pub mod models;
pub mod services;
pub mod view;

pub use models::{CardState, CardStates, DashboardController, DashboardEvent, DashboardState, Phase};
pub use view::{CardDetails, CardView, DashboardView, GridView, SearchBox};
