//! # pinsev-http
//!
//! Fetch stage for the PiN/Severity pipeline: pages location codes out of
//! the HDX Humanitarian API (HAPI) and downloads one administrative boundary
//! GeoJSON per country.

/// Fetch-stage settings.
pub mod config;
/// Error types and result aliases.
pub mod error;

pub use config::HapiConfig;
pub use error::{HttpError, HttpResult};

use reqwest::Client;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};

/// HAPI and boundary download client.
#[derive(Debug, Clone)]
pub struct HapiClient {
    client: Client,
    config: HapiConfig,
}

/// Outcome of a boundary download run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryReport {
    /// Files written
    pub saved: Vec<PathBuf>,
    /// Codes that failed, with the reason
    pub failed: Vec<(String, String)>,
}

impl HapiClient {
    /// Build a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::Client` if the underlying client cannot be built.
    pub fn new(config: HapiConfig) -> HttpResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            // Disable system proxy lookup to avoid macOS system-configuration issues
            .no_proxy()
            .build()
            .map_err(HttpError::Client)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HapiConfig {
        &self.config
    }

    /// GET a URL and decode the body as JSON.
    async fn get_json(&self, url: &str) -> HttpResult<JsonValue> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| HttpError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|source| HttpError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Fetch every page of a query, concatenating the `data` arrays.
    ///
    /// `query_url` must already carry a query string; `offset` and `limit`
    /// are appended. Paging stops at the first page shorter than the limit.
    pub async fn fetch_paginated(&self, query_url: &str) -> HttpResult<Vec<JsonValue>> {
        let limit = self.config.limit;
        let mut results = Vec::new();
        let mut offset = 0;

        loop {
            let url = format!("{query_url}&offset={offset}&limit={limit}");
            let body = self.get_json(&url).await?;
            let JsonValue::Object(mut body) = body else {
                return Err(HttpError::MissingData { url });
            };
            let Some(JsonValue::Array(page)) = body.remove("data") else {
                return Err(HttpError::MissingData { url });
            };

            let count = page.len();
            tracing::info!(offset, count, "fetched page");
            results.extend(page);

            if count < limit {
                break;
            }
            offset += limit;
        }

        Ok(results)
    }

    /// Every location code HAPI knows about.
    pub async fn fetch_location_codes(&self) -> HttpResult<Vec<String>> {
        let items = self
            .fetch_paginated(&self.config.location_query_url())
            .await?;

        let mut codes = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item.get("code").and_then(JsonValue::as_str) {
                Some(code) => codes.push(code.to_string()),
                None => tracing::warn!(index, "location without a code"),
            }
        }
        Ok(codes)
    }

    /// Download and decode one GeoJSON document.
    pub async fn download_geojson(&self, url: &str) -> HttpResult<JsonValue> {
        tracing::info!(url, "downloading GeoJSON");
        self.get_json(url).await
    }

    /// Download `itos-{code}.geojson` for every code into `out_dir`.
    ///
    /// A failing country is logged and recorded; the loop carries on.
    pub async fn download_boundaries<S: AsRef<str>>(
        &self,
        codes: &[S],
        out_dir: &Path,
    ) -> BoundaryReport {
        let mut report = BoundaryReport::default();

        for code in codes {
            let code = code.as_ref();
            let url = self.config.geojson_url(code);
            let path = out_dir.join(format!("itos-{code}.geojson"));

            let outcome = match self.download_geojson(&url).await {
                Ok(geojson) => save_json(&geojson, &path),
                Err(e) => Err(e),
            };
            match outcome {
                Ok(()) => report.saved.push(path),
                Err(e) => {
                    tracing::warn!(code, error = %e, "boundary download failed");
                    report.failed.push((code.to_string(), e.to_string()));
                }
            }
        }

        tracing::info!(
            saved = report.saved.len(),
            failed = report.failed.len(),
            "boundary downloads finished"
        );
        report
    }
}

/// Write any serializable value as pretty JSON, creating parent directories.
pub fn save_json<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> HttpResult<()> {
    let path = path.as_ref();
    let rendered = serde_json::to_vec_pretty(value)?;

    let write_error = |source| HttpError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(path, rendered).map_err(write_error)?;

    tracing::debug!(path = %path.display(), "saved JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_client_new() {
        let client = HapiClient::new(HapiConfig::new("abc"));
        assert!(client.is_ok());
        assert_eq!(client.unwrap().config().app_identifier, "abc");
    }

    #[test]
    fn test_save_json_creates_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("itos-AFG.geojson");
        save_json(&json!({"type": "FeatureCollection", "features": []}), &path).unwrap();

        let written: JsonValue =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["type"], "FeatureCollection");
    }

    #[test]
    fn test_save_json_to_directory_fails() {
        let dir = tempdir().unwrap();
        let err = save_json(&json!([]), dir.path()).unwrap_err();
        assert!(matches!(err, HttpError::Write { .. }));
    }

    #[test]
    fn test_boundary_report_default() {
        let report = BoundaryReport::default();
        assert!(report.saved.is_empty());
        assert!(report.failed.is_empty());
    }
}
