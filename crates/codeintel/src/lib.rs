//! Pagination cursors for code intelligence result lists.
//!
//! A references query walks several phases (the starting dump, the definitions
//! of its monikers, other dumps of the repository, dependent repositories).
//! Each page hands the client an opaque cursor that resumes the walk.
//!
//! * [`Cursor`]: the resumable position and its URL-safe wire form
//! * [`decode_cursor_from_request`]: resumes an encoded cursor or starts a fresh one
//! * [`DumpStore`], [`BundleStore`]: lookups the fresh path depends on

#![warn(missing_docs)]

pub mod cursor;
pub mod error;
pub mod request;
pub mod store;

pub use cursor::{Cursor, MonikerData, Phase};
pub use error::{CursorError, Result};
pub use request::{CursorQuery, decode_cursor_from_request};
pub use store::{BundleStore, Dump, DumpStore, StoreError};
