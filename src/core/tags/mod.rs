//! core/tags/mod.rs
//!
//! ID3 tag reading and normalization.
//! Public API:
//! - [`read_frames`] reads a file's tag container into raw frames.
//! - [`resolve`] / [`resolve_report`] map raw frames to a [`Record`](crate::core::types::Record).
//! - [`canonical_name_for`] is the frame id lookup both of them rely on.

mod frames;
mod genres;
mod read;
mod recover;
mod resolve;
mod util;

pub use frames::{canonical_name_for, table_entries};
pub use read::read_frames;
pub use resolve::{MULTI_VALUE_SEPARATOR, Resolution, resolve, resolve_report};
