//! Per-tick dispatch engine for the multi-elevator simulation.
//!
//! Each tick the server hands over a snapshot of every car and every waiting
//! passenger, and the controller answers with at most one mechanically valid
//! command per car. Routing follows a continuous sweep: each car commits to a
//! direction, serves every matching call on its way, and reverses only at
//! the top or bottom floor.
//!
//! # Modules
//!
//! - [`actions`] -- Per-car [`Action`]s and the reusable per-tick [`ActionSet`].
//! - [`call_pool`] -- Waiting passengers grouped by floor.
//! - [`config`] -- Configuration loading from `lift-config.yaml` into
//!   strongly-typed structs.
//! - [`dispatch`] -- The [`Dispatcher`] and its once-per-tick pass.
//! - [`runner`] -- The fetch/dispatch/submit loop over a [`Transport`].
//! - [`step`] -- The per-car decision function.
//! - [`sweep`] -- Committed sweep directions and the move rule.
//!
//! The crate performs no I/O of its own; the network lives behind
//! [`Transport`].
//!
//! [`Action`]: actions::Action
//! [`ActionSet`]: actions::ActionSet
//! [`Dispatcher`]: dispatch::Dispatcher
//! [`Transport`]: runner::Transport

pub mod actions;
pub mod call_pool;
pub mod config;
pub mod dispatch;
pub mod runner;
pub mod step;
pub mod sweep;
