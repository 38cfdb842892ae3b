//! Resource updaters.

mod call;

pub use call::CallUpdater;
