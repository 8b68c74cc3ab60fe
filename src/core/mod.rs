//! # Core Application Logic
//!
//! Coordinators, view-models and the recipe pipeline.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App + coordinators   │
//!                    │  • view-models + cells  │
//!                    │  • Action / dispatch()  │
//!                    │                         │
//!                    │  No terminal. No HTTP.  │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │    API     │
//!     │  Adapter   │                          │ (reqwest)  │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`coordinator`]: `App`, the coordinator tree and the navigation stack
//! - [`list`] / [`details`]: the two screen view-models
//! - [`load`]: the load/error/retry cycle both view-models share
//! - [`repository`]: fetching plus the pure filter/sort pipeline
//! - [`action`]: the `Action` enum, everything that can happen in the app

pub mod action;
pub mod cell;
pub mod config;
pub mod coordinator;
pub mod details;
pub mod event;
pub mod list;
pub mod load;
pub mod recipe;
pub mod repository;
