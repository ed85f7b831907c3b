//! Wire types for the SQL analysis service.

use serde::{Deserialize, Serialize};

/// One column description row as produced by the analysis service.
///
/// Table membership is implicit: rows sharing a `table` value belong to
/// the same table and are grouped client-side when building the graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
	pub table: String,
	pub column: String,
	pub description: String,
}

/// Response body of `GET /analyze-sql/`.
#[derive(Clone, Debug, Deserialize)]
pub struct AnalyzeResponse {
	#[serde(default)]
	pub message: String,
	#[serde(default)]
	pub total_columns_processed: usize,
	pub results: Vec<AnalysisResult>,
}

/// Response body of `POST /upload-sql/`.
#[derive(Clone, Debug, Deserialize)]
pub struct UploadResponse {
	#[serde(default)]
	pub message: String,
}

/// FastAPI-style error body: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
	pub detail: String,
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn analyze_response_deserializes() {
		let body = json!({
			"message": "Analysis complete",
			"total_columns_processed": 2,
			"results": [
				{"table": "users", "column": "id", "description": "Primary key"},
				{"table": "users", "column": "email", "description": "Login address"}
			]
		});
		let resp: AnalyzeResponse = serde_json::from_value(body).unwrap();
		assert_eq!(resp.total_columns_processed, 2);
		assert_eq!(resp.results.len(), 2);
		assert_eq!(resp.results[0].table, "users");
		assert_eq!(resp.results[1].column, "email");
	}

	#[test]
	fn analyze_response_tolerates_missing_counters() {
		let body = json!({"results": []});
		let resp: AnalyzeResponse = serde_json::from_value(body).unwrap();
		assert!(resp.message.is_empty());
		assert_eq!(resp.total_columns_processed, 0);
		assert!(resp.results.is_empty());
	}

	#[test]
	fn analysis_result_ignores_unknown_fields() {
		let body = json!({
			"table": "orders",
			"column": "total",
			"description": "Order total in cents",
			"confidence": 0.93
		});
		let row: AnalysisResult = serde_json::from_value(body).unwrap();
		assert_eq!(row.column, "total");
	}

	#[test]
	fn error_body_matches_fastapi_shape() {
		let body = json!({"detail": "No SQL files found in database"});
		let err: ErrorBody = serde_json::from_value(body).unwrap();
		assert_eq!(err.detail, "No SQL files found in database");
	}
}
