//! Metrics detail view and its polling loop
//!
//! [`DetailController`] owns the timer that keeps a [`DetailView`] fresh for
//! one instance at a time. The view is published on a `watch` channel; the
//! terminal renderer in `cli::metrics` redraws whenever it changes.

mod controller;
mod view;

pub use controller::{DetailController, PollOptions};
pub use view::{DetailView, Snapshot};
