//! HTTP client for the school API

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use reqwest::{multipart, Client};
use schoolctl_core::{School, SchoolPayload};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    data: Vec<School>,
}

#[derive(Debug, Deserialize)]
struct CreatedSchool {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    data: CreatedSchool,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    path: String,
}

/// Thin wrapper over the three API calls the CLI makes
pub struct SchoolClient {
    http: Client,
    endpoint: String,
}

impl SchoolClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    /// Fetch the full listing, newest first.
    pub async fn list(&self) -> Result<Vec<School>> {
        let response = self
            .http
            .get(self.url("/api/schools"))
            .send()
            .await
            .context("Failed to connect to school API")?;

        let list: ListResponse = handle_response(response).await?;
        Ok(list.data)
    }

    /// Upload an image file and return its public path.
    pub async fn upload_image(&self, path: &Path) -> Result<String> {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        if mime.type_() != mime_guess::mime::IMAGE {
            bail!("{} is not an image ({})", path.display(), mime);
        }

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image: {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime.essence_str())
            .context("Invalid image content type")?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .await
            .context("Failed to connect to school API")?;

        let upload: UploadResponse = handle_response(response).await?;
        Ok(upload.path)
    }

    /// Submit a school and return the new id.
    pub async fn create(&self, payload: &SchoolPayload) -> Result<i64> {
        let response = self
            .http
            .post(self.url("/api/schools"))
            .json(payload)
            .send()
            .await
            .context("Failed to connect to school API")?;

        let created: CreateResponse = handle_response(response).await?;
        Ok(created.data.id)
    }
}

async fn handle_response<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        response.json::<T>().await.context("Failed to parse response")
    } else {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        match serde_json::from_str::<ErrorResponse>(&error_text) {
            Ok(error_resp) => Err(anyhow!("{}: {}", status, error_resp.error)),
            Err(_) => Err(anyhow!("{}: {}", status, error_text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_trailing_slash_is_dropped() {
        let client = SchoolClient::new("http://localhost:3030/").unwrap();
        assert_eq!(client.url("/api/schools"), "http://localhost:3030/api/schools");
    }

    #[tokio::test]
    async fn upload_rejects_non_image_before_sending() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let client = SchoolClient::new("http://127.0.0.1:1").unwrap();
        let err = client.upload_image(&path).await.unwrap_err();
        assert!(err.to_string().contains("is not an image"));
    }

    #[test]
    fn list_response_parses() {
        let body = r#"{
            "success": true,
            "data": [{
                "id": 3,
                "name": "Hillside Academy",
                "address": "7 Ridge Lane, Upper Town",
                "city": "Shimla",
                "state": "Himachal Pradesh",
                "contact": "9812345678",
                "email_id": "office@hillside.edu",
                "image": null,
                "created_at": "2024-05-01T10:00:00Z",
                "updated_at": "2024-05-01T10:00:00Z"
            }]
        }"#;
        let parsed: ListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.data[0].id, 3);
        assert!(parsed.data[0].image.is_none());
    }
}
