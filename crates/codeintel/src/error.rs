//! Cursor error types.

use crate::store::StoreError;

/// A convenient type alias for `Result` with `E` = [`CursorError`].
pub type Result<T, E = CursorError> = std::result::Result<T, E>;

/// Failures while encoding, decoding or resolving a cursor.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CursorError {
	/// The cursor parameter is not unpadded URL-safe base64.
	#[error("cursor is not valid base64: {0}")]
	Encoding(#[from] base64::DecodeError),
	/// The decoded bytes are not a cursor document.
	#[error("malformed cursor payload: {0}")]
	Payload(#[from] serde_json::Error),
	/// The upload named by the request does not exist.
	#[error("unknown dump {0}")]
	MissingDump(i64),
	/// A dump or bundle lookup failed.
	#[error(transparent)]
	Store(#[from] StoreError),
}
