//! GraphQL transport seam.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::Result;

/// One GraphQL request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
	/// Query or mutation document.
	pub query: &'static str,
	/// Operation variables, a JSON object.
	pub variables: Value,
	/// Whether the request may carry private data (repository names, file paths).
	pub might_contain_private_info: bool,
}

/// Sends GraphQL requests to the backend.
///
/// Implemented by the embedding application; the logger never retries.
#[async_trait]
pub trait GraphQlClient: Send + Sync {
	/// Executes `request` and returns the `data` member of the response.
	async fn request(&self, request: GraphQlRequest) -> Result<Value>;
}
