//! Resolving the cursor of a references request.

use tracing::debug;

use crate::cursor::Cursor;
use crate::error::{CursorError, Result};
use crate::store::{BundleStore, DumpStore};

/// Query parameters of a references request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorQuery {
	/// Encoded cursor of a follow-up page.
	pub cursor: Option<String>,
	/// Repository-relative path of the queried file.
	pub path: String,
	/// Zero-based line.
	pub line: u32,
	/// Zero-based character.
	pub character: u32,
	/// Upload the first page is answered from.
	pub upload_id: i64,
}

impl CursorQuery {
	/// Collects `cursor`, `path`, `line`, `character` and `uploadId` from raw
	/// parameter pairs. Numbers that do not parse read as zero, an empty cursor
	/// counts as absent and later pairs override earlier ones.
	pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
		let mut query = Self::default();
		for (key, value) in pairs {
			match key {
				"cursor" => query.cursor = Some(value).filter(|v| !v.is_empty()).map(str::to_string),
				"path" => query.path = value.to_string(),
				"line" => query.line = value.parse().unwrap_or_default(),
				"character" => query.character = value.parse().unwrap_or_default(),
				"uploadId" => query.upload_id = value.parse().unwrap_or_default(),
				_ => {}
			}
		}
		query
	}
}

/// Resumes the encoded cursor of `query`, or starts a `same-dump` cursor at the
/// queried position.
///
/// The fresh path strips the dump root from the path and attaches the monikers
/// of every range covering the position. Neither store is consulted when the
/// request carries a cursor.
pub async fn decode_cursor_from_request(query: &CursorQuery, dumps: &dyn DumpStore, bundles: &dyn BundleStore) -> Result<Cursor> {
	if let Some(encoded) = &query.cursor {
		return Cursor::decode(encoded);
	}

	let dump = dumps.dump_by_id(query.upload_id).await?.ok_or(CursorError::MissingDump(query.upload_id))?;
	let path = query.path.strip_prefix(dump.root.as_str()).unwrap_or(&query.path);
	let monikers = bundles
		.monikers_by_position(dump.id, path, query.line, query.character)
		.await?
		.into_iter()
		.flatten()
		.collect::<Vec<_>>();

	debug!(dump = dump.id, path, monikers = monikers.len(), "starting fresh cursor");
	Ok(Cursor::same_dump(dump.id, path, query.line, query.character, monikers))
}
