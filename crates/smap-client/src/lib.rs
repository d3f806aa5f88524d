#![deny(unsafe_code)]

//! HTTP implementations of the workstation's collaborator seams.
//!
//! One blocking client speaks the whole collaborator protocol: file and
//! connection extraction, semantic mapping, artifact generation, catalog
//! search, translation, and connection-profile CRUD. Transport errors
//! and non-success statuses surface as [`SmapError::Transport`].

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::{Client, Response, multipart};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use smap_core::collaborators::{
    ArtifactGenerator, ClassCatalog, ProfileStore, SchemaExtractor, SemanticMapper, Translator,
};
use smap_model::{
    Artifact, ConnectionProfile, MappingRecord, RawTable, Result, SearchResult, SmapError,
    TranslationResponse,
};

/// Default workstation endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default number of catalog results requested per search.
pub const SEARCH_LIMIT: usize = 5;

/// Blocking HTTP client for every external collaborator.
#[derive(Debug, Clone)]
pub struct HttpWorkstation {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[allow(dead_code)]
    #[serde(default)]
    filename: String,
    tables: Vec<RawTable>,
}

#[derive(Debug, Deserialize)]
struct ConnectResponse {
    #[allow(dead_code)]
    #[serde(default)]
    connection: String,
    tables: Vec<RawTable>,
}

impl HttpWorkstation {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(transport)?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let response = check_status(response)?;
        response.json().map_err(transport)
    }
}

fn transport(error: reqwest::Error) -> SmapError {
    SmapError::Transport(error.to_string())
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response.text().unwrap_or_default();
    Err(SmapError::Transport(format!(
        "collaborator returned {status}: {detail}"
    )))
}

impl SchemaExtractor for HttpWorkstation {
    fn extract_file(&self, file_name: &str, contents: &[u8]) -> Result<Vec<RawTable>> {
        debug!(file = file_name, bytes = contents.len(), "uploading SQL file");
        let part = multipart::Part::bytes(contents.to_vec()).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);
        let response = self
            .client
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .map_err(transport)?;
        let body: UploadResponse = self.decode(response)?;
        Ok(body.tables)
    }

    fn extract_connection(&self, connection_name: &str) -> Result<Vec<RawTable>> {
        debug!(connection = connection_name, "extracting via saved connection");
        let response = self
            .client
            .post(self.url("/api/connect"))
            .json(&serde_json::json!({ "connection_name": connection_name }))
            .send()
            .map_err(transport)?;
        let body: ConnectResponse = self.decode(response)?;
        Ok(body.tables)
    }
}

impl SemanticMapper for HttpWorkstation {
    fn map_tables(&self, tables: &[RawTable]) -> Result<Vec<MappingRecord>> {
        let response = self
            .client
            .post(self.url("/api/map"))
            .json(&serde_json::json!({ "tables": tables }))
            .send()
            .map_err(transport)?;
        self.decode(response)
    }
}

impl ArtifactGenerator for HttpWorkstation {
    fn generate(&self, records: &[MappingRecord]) -> Result<Artifact> {
        let response = self
            .client
            .post(self.url("/api/generate"))
            .json(records)
            .send()
            .map_err(transport)?;
        self.decode(response)
    }
}

impl ClassCatalog for HttpWorkstation {
    fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let response = self
            .client
            .get(self.url("/api/search"))
            .query(&[("query", query), ("limit", &SEARCH_LIMIT.to_string())])
            .send()
            .map_err(transport)?;
        self.decode(response)
    }
}

impl Translator for HttpWorkstation {
    fn translate(&self, text: &str) -> Result<String> {
        let response = self
            .client
            .get(self.url("/api/translate"))
            .query(&[("text", text)])
            .send()
            .map_err(transport)?;
        let body: TranslationResponse = self.decode(response)?;
        Ok(body.translated)
    }
}

impl ProfileStore for HttpWorkstation {
    fn list(&self) -> Result<BTreeMap<String, ConnectionProfile>> {
        let response = self
            .client
            .get(self.url("/api/connections"))
            .send()
            .map_err(transport)?;
        self.decode(response)
    }

    fn save(&self, profile: &ConnectionProfile) -> Result<()> {
        let response = self
            .client
            .post(self.url("/api/connections"))
            .json(profile)
            .send()
            .map_err(transport)?;
        check_status(response)?;
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<()> {
        let path = format!("/api/connections/{}", urlencoding::encode(name));
        let response = self
            .client
            .delete(self.url(&path))
            .send()
            .map_err(transport)?;
        check_status(response)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let ws = HttpWorkstation::new("http://localhost:8000/").expect("client");
        assert_eq!(ws.base_url(), "http://localhost:8000");
        assert_eq!(ws.url("/api/map"), "http://localhost:8000/api/map");
    }

    #[test]
    fn delete_path_escapes_profile_names() {
        assert_eq!(urlencoding::encode("my db"), "my%20db");
    }

    #[test]
    fn upload_response_shape() {
        let body: UploadResponse = serde_json::from_str(
            r#"{"filename":"shop.sql","tables":[{"name":"users","columns":[{"name":"id","type":"INTEGER"}]}]}"#,
        )
        .expect("decode");
        assert_eq!(body.tables.len(), 1);
        assert_eq!(body.tables[0].columns[0].data_type, "INTEGER");
    }
}
