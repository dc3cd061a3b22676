//! # CLI Module
//!
//! User-facing flows of the tool, sitting between the command-line entry
//! point and the Spotify client.
//!
//! ## Flow
//!
//! ```text
//! configure → authorize → exchange → fetch → confirm → remove
//! ```
//!
//! [`purge`] covers the last three steps: it fetches the saved albums with a
//! spinner, prints them as a table, asks for confirmation through a
//! [`Confirmation`] implementation and removes the albums in batches of
//! [`crate::spotify::library::REMOVE_BATCH_SIZE`] while a progress bar
//! tracks the running count.
//!
//! A declined prompt is not an error: [`purge`] returns
//! [`PurgeOutcome::Declined`] and no removal request is sent.

mod purge;

pub use purge::Confirmation;
pub use purge::PurgeOptions;
pub use purge::PurgeOutcome;
pub use purge::TerminalConfirmation;
pub use purge::purge;
pub use purge::remove_in_batches;
