//! Trait definitions for Twilio operations.
//!
//! Each resource updater implements the traits it supports, encapsulating
//! endpoint differences in the implementations.

mod updater;

pub use updater::Updater;
