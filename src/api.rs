//! Thin fetch client for the SQL analysis service.
//!
//! The service is an opaque collaborator on a fixed local port; every
//! call here is "send request, await response" with no retry or
//! cancellation. Failures collapse into a single [`ApiError`] whose
//! `Display` text is what the user sees in a notification.

use gloo_net::http::{Request, Response};
use log::info;
use serde::de::DeserializeOwned;
use thiserror::Error;
use web_sys::{File, FormData};

use crate::model::{AnalysisResult, AnalyzeResponse, ErrorBody, UploadResponse};

const DEFAULT_BASE: &str = "http://localhost:8000";

/// Base URL of the analysis service, overridable at compile time.
pub fn base_url() -> &'static str {
	option_env!("LINEAGE_API_BASE").unwrap_or(DEFAULT_BASE)
}

/// Anything that can go wrong talking to the analysis service.
#[derive(Debug, Error)]
pub enum ApiError {
	/// The fetch itself failed (network down, CORS, service not running).
	#[error("request failed: {0}")]
	Transport(String),
	/// The selection was rejected before any request was made.
	#[error("{0}")]
	Rejected(String),
	/// The service answered with a non-2xx status.
	#[error("server returned {status}: {detail}")]
	Status { status: u16, detail: String },
	/// The response body was not the JSON we expected.
	#[error("malformed response: {0}")]
	Decode(String),
}

impl From<gloo_net::Error> for ApiError {
	fn from(err: gloo_net::Error) -> Self {
		match err {
			gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
			other => ApiError::Transport(other.to_string()),
		}
	}
}

/// The backend only accepts `.sql` files; everything else is rejected
/// client-side before the upload starts.
pub fn is_sql_file(name: &str) -> bool {
	name.ends_with(".sql")
}

fn endpoint(path: &str) -> String {
	format!("{}{}", base_url(), path)
}

/// One multipart part named `files` per selected file, filename preserved.
fn build_upload_form(files: &[File]) -> Result<FormData, ApiError> {
	let form = FormData::new()
		.map_err(|_| ApiError::Transport("could not construct form data".into()))?;
	for file in files {
		form.append_with_blob_and_filename("files", file, &file.name())
			.map_err(|_| ApiError::Transport(format!("could not attach {}", file.name())))?;
	}
	Ok(form)
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
	if !resp.ok() {
		let detail = match resp.json::<ErrorBody>().await {
			Ok(body) => body.detail,
			Err(_) => resp.status_text(),
		};
		return Err(ApiError::Status {
			status: resp.status(),
			detail,
		});
	}
	Ok(resp.json::<T>().await?)
}

/// `POST /upload-sql/` with the selected files as a multipart form.
pub async fn upload_sql(files: &[File]) -> Result<UploadResponse, ApiError> {
	if let Some(bad) = files.iter().map(|f| f.name()).find(|n| !is_sql_file(n)) {
		return Err(ApiError::Rejected(format!("{bad} is not a SQL file")));
	}
	info!("Uploading {} SQL file(s)", files.len());
	let form = build_upload_form(files)?;
	let resp = Request::post(&endpoint("/upload-sql/"))
		.body(form)?
		.send()
		.await?;
	read_json(resp).await
}

/// `GET /analyze-sql/`: runs the analysis over everything uploaded so far.
pub async fn analyze_sql() -> Result<AnalyzeResponse, ApiError> {
	info!("Requesting lineage analysis");
	let resp = Request::get(&endpoint("/analyze-sql/")).send().await?;
	read_json(resp).await
}

/// `GET /get-descriptions/`: previously stored rows, optionally filtered
/// to one table, so the graph can be rebuilt without re-running analysis.
pub async fn get_descriptions(table: Option<&str>) -> Result<Vec<AnalysisResult>, ApiError> {
	let mut builder = Request::get(&endpoint("/get-descriptions/"));
	if let Some(table) = table {
		builder = builder.query([("table_name", table)]);
	}
	let resp = builder.send().await?;
	read_json(resp).await
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sql_extension_checked_verbatim() {
		assert!(is_sql_file("migrations.sql"));
		assert!(is_sql_file("a.b.sql"));
		assert!(!is_sql_file("report.csv"));
		assert!(!is_sql_file("dump.SQL"));
		assert!(!is_sql_file("sql"));
	}

	#[test]
	fn endpoints_join_base_and_path() {
		assert_eq!(endpoint("/upload-sql/"), format!("{}/upload-sql/", base_url()));
		assert!(endpoint("/analyze-sql/").starts_with("http://"));
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
	use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

	use super::*;

	wasm_bindgen_test_configure!(run_in_browser);

	fn sql_file(name: &str) -> File {
		let parts = js_sys::Array::of1(&"select 1;".into());
		File::new_with_str_sequence(&parts, name).unwrap()
	}

	#[wasm_bindgen_test]
	fn upload_form_has_one_part_per_file() {
		let files = vec![sql_file("a.sql"), sql_file("b.sql"), sql_file("c.sql")];
		let form = build_upload_form(&files).unwrap();
		assert_eq!(form.get_all("files").length(), 3);
	}
}
