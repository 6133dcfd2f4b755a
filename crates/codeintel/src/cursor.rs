//! Cursor wire format.
//!
//! A cursor travels as unpadded URL-safe base64 over its JSON document. Field
//! names are PascalCase (`DumpID`, `SkipResults`, ...) so cursors stay readable
//! by every server that shares the format.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// Stage of a paged references query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
	/// References inside the dump the query started from.
	#[default]
	SameDump,
	/// References reached through the definitions of the position's monikers.
	DefinitionMonikers,
	/// Other dumps of the same repository.
	SameRepo,
	/// Dumps of repositories depending on the moniker's package.
	RemoteRepo,
}

/// Moniker attached to a range of a dump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MonikerData {
	/// `import`, `export` or `local`.
	pub kind: String,
	/// Indexer scheme, e.g. `gomod`.
	pub scheme: String,
	/// Scheme-specific symbol identifier.
	pub identifier: String,
	/// Package the moniker belongs to, empty when unknown.
	#[serde(rename = "packageInformationID")]
	pub package_information_id: String,
}

/// Resumable position inside a references query.
///
/// Which fields are meaningful depends on [`Phase`]: the position fields and
/// monikers drive `same-dump` and `definition-monikers`, the package and
/// batching fields drive `same-repo` and `remote-repo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Cursor {
	/// Current stage.
	pub phase: Phase,
	/// Dump the current stage reads from.
	#[serde(rename = "DumpID")]
	pub dump_id: i64,
	/// Path inside the dump.
	pub path: String,
	/// Zero-based line of the queried position.
	pub line: u32,
	/// Zero-based character of the queried position.
	pub character: u32,
	/// Monikers of every range covering the position.
	#[serde(deserialize_with = "null_as_empty")]
	pub monikers: Vec<MonikerData>,
	/// Results already returned in the current stage.
	pub skip_results: usize,
	/// Moniker identifier searched across dumps.
	pub identifier: String,
	/// Moniker scheme searched across dumps.
	pub scheme: String,
	/// Package name.
	pub name: String,
	/// Package version.
	pub version: String,
	/// Dumps of the current batch.
	#[serde(rename = "DumpIDs", deserialize_with = "null_as_empty")]
	pub dump_ids: Vec<i64>,
	/// Number of dumps to visit across all batches.
	pub total_dumps_when_batching: usize,
	/// Dumps consumed by earlier batches.
	pub skip_dumps_when_batching: usize,
	/// Dumps of the current batch already exhausted.
	pub skip_dumps_in_batch: usize,
	/// Results already returned from the current dump.
	pub skip_results_in_dump: usize,
}

impl Cursor {
	/// First page of a query at `line`/`character` of `path` in dump `dump_id`.
	pub fn same_dump(dump_id: i64, path: impl Into<String>, line: u32, character: u32, monikers: Vec<MonikerData>) -> Self {
		Self {
			phase: Phase::SameDump,
			dump_id,
			path: path.into(),
			line,
			character,
			monikers,
			..Self::default()
		}
	}

	/// Returns the opaque form handed to clients.
	pub fn encode(&self) -> Result<String> {
		let json = serde_json::to_vec(self)?;
		Ok(URL_SAFE_NO_PAD.encode(json))
	}

	/// Parses a cursor previously produced by [`Cursor::encode`].
	pub fn decode(encoded: &str) -> Result<Self> {
		let json = URL_SAFE_NO_PAD.decode(encoded)?;
		Ok(serde_json::from_slice(&json)?)
	}
}

/// Reads a JSON `null` list as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de>,
{
	Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
