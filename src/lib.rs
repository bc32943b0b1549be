//! `MixQ` - queue controller for a remote music player
//!
//! This library keeps a local play queue in step with a MixQ server: it loads
//! playlists, reorders and persists the queue, projects start times for every
//! row and advances the queue when the player finishes a track.

/// Client modules for the MixQ server and local storage
pub mod clients;
/// Poll loop and user actions
pub mod controller;
/// Theme and time zone preferences
pub mod preferences;
/// Local queue operations
pub mod queue;
/// Start time projection and time formatting
pub mod schedule;
/// Text rendering of the queue page
pub mod view;

pub use controller::{Config, ConfigBuilder, Controller, PollOutcome};
pub use queue::Queue;
pub use view::QueueView;
