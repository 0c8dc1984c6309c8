//! HTTP client for the remote class data endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ClassStore;
use crate::config::RemoteConfig;
use crate::error::{AppError, Result};
use crate::models::{
    ClassSnapshot, CreateHomework, CreateMaterial, CreateNews, CreateStudent, UpdateHomework, UpdateMaterial,
    UpdateNews, UpdateStudent,
};

/// Header carrying the shared admin secret.
pub const PASSWORD_HEADER: &str = "X-Password";

/// Body of every POST/PUT to the data endpoint.
#[derive(Debug, Serialize)]
struct ActionRequest<'a, T> {
    action: &'a str,
    data: &'a T,
}

#[derive(Debug, Serialize)]
struct PhotoData<'a> {
    photo_url: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    valid: bool,
}

/// Class data endpoint client.
///
/// Every request carries the shared secret in [`PASSWORD_HEADER`], so the
/// server checks authorization independently of the confirmation prompt.
pub struct RemoteStore {
    client: Client,
    api_url: String,
    verify_url: String,
    secret: String,
}

impl RemoteStore {
    /// Create a new client instance.
    pub fn new(config: &RemoteConfig, secret: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            verify_url: config.verify_url.trim_end_matches('/').to_string(),
            secret: secret.into(),
        })
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url).header(PASSWORD_HEADER, &self.secret)
    }

    /// Send `{action, data}` to the data endpoint.
    async fn send_action<T: Serialize + Sync>(
        &self,
        method: Method,
        operation: &'static str,
        action: &str,
        data: &T,
    ) -> Result<Response> {
        debug!("{method} {action}");
        let response = self
            .request(method, &self.api_url)
            .json(&ActionRequest { action, data })
            .send()
            .await?;
        ensure_success(response, operation)
    }

    async fn create<T: Serialize + Sync>(&self, operation: &'static str, action: &str, data: &T) -> Result<i64> {
        let response = self.send_action(Method::POST, operation, action, data).await?;
        let body: serde_json::Value = response.json().await?;
        parse_created_id(&body)
    }

    async fn update<T: Serialize + Sync>(&self, operation: &'static str, action: &str, data: &T) -> Result<()> {
        self.send_action(Method::PUT, operation, action, data).await?;
        Ok(())
    }

    async fn delete(&self, operation: &'static str, action: &str, id: i64) -> Result<()> {
        debug!("DELETE {action} id={id}");
        let response = self
            .request(Method::DELETE, &self.api_url)
            .query(&[("action", action.to_string()), ("id", id.to_string())])
            .send()
            .await?;
        ensure_success(response, operation)?;
        Ok(())
    }
}

fn ensure_success(response: Response, operation: &'static str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(AppError::request(operation, status))
    }
}

/// Read the `id` field of a creation response.
fn parse_created_id(body: &serde_json::Value) -> Result<i64> {
    body.get("id")
        .and_then(serde_json::Value::as_i64)
        .ok_or_else(|| AppError::parse(format!("Creation response without id: {body}")))
}

#[async_trait]
impl ClassStore for RemoteStore {
    async fn fetch_all(&self) -> Result<ClassSnapshot> {
        let response = self.request(Method::GET, &self.api_url).send().await?;
        let response = ensure_success(response, "fetch data")?;
        Ok(response.json().await?)
    }

    async fn update_photo(&self, photo_url: Option<&str>) -> Result<()> {
        self.update("update photo", "update_photo", &PhotoData { photo_url }).await
    }

    async fn add_news(&self, data: &CreateNews) -> Result<i64> {
        self.create("add news", "add_news", data).await
    }

    async fn update_news(&self, data: &UpdateNews) -> Result<()> {
        self.update("update news", "update_news", data).await
    }

    async fn delete_news(&self, id: i64) -> Result<()> {
        self.delete("delete news", "delete_news", id).await
    }

    async fn add_student(&self, data: &CreateStudent) -> Result<i64> {
        self.create("add student", "add_student", data).await
    }

    async fn update_student(&self, data: &UpdateStudent) -> Result<()> {
        self.update("update student", "update_student", data).await
    }

    async fn delete_student(&self, id: i64) -> Result<()> {
        self.delete("delete student", "delete_student", id).await
    }

    async fn add_homework(&self, data: &CreateHomework) -> Result<i64> {
        self.create("add homework", "add_homework", data).await
    }

    async fn update_homework(&self, data: &UpdateHomework) -> Result<()> {
        self.update("update homework", "update_homework", data).await
    }

    async fn delete_homework(&self, id: i64) -> Result<()> {
        self.delete("delete homework", "delete_homework", id).await
    }

    async fn add_material(&self, data: &CreateMaterial) -> Result<i64> {
        self.create("add material", "add_material", data).await
    }

    async fn update_material(&self, data: &UpdateMaterial) -> Result<()> {
        self.update("update material", "update_material", data).await
    }

    async fn delete_material(&self, id: i64) -> Result<()> {
        self.delete("delete material", "delete_material", id).await
    }

    async fn verify_password(&self, candidate: &str) -> Result<bool> {
        let response = self
            .request(Method::POST, &self.verify_url)
            .json(&VerifyRequest { password: candidate })
            .send()
            .await?;
        let response = ensure_success(response, "verify password")?;
        let body: VerifyResponse = response.json().await?;
        Ok(body.valid)
    }
}
