use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{ApiError, ConsoleConfig, Resource};

use crate::services::logging::Logger;

const COMPONENT: &str = "api";

/// REST client for the hotel backend.
///
/// Every collection follows the same conventions, so the client is written
/// once against [`Resource`] instead of once per entity.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /X/Listar`
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, ApiError> {
        let url = self.url(&R::ENDPOINT.list_path());
        Logger::debug_with_component(COMPONENT, &format!("GET {}", url));
        let response = Self::check(Request::get(&url).send().await, "GET", &url).await?;
        Self::decode(response, &url).await
    }

    /// `GET /X/{id}`
    pub async fn get<R: Resource>(&self, id: i64) -> Result<R, ApiError> {
        let url = self.url(&R::ENDPOINT.item_path(id));
        Logger::debug_with_component(COMPONENT, &format!("GET {}", url));
        let response = Self::check(Request::get(&url).send().await, "GET", &url).await?;
        Self::decode(response, &url).await
    }

    /// `POST /X/Crear`
    pub async fn create<R: Resource>(&self, request: &R::Request) -> Result<(), ApiError> {
        let url = self.url(&R::ENDPOINT.create_path());
        Logger::debug_with_component(COMPONENT, &format!("POST {}", url));
        let pending = Request::post(&url)
            .json(request)
            .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))?;
        Self::check(pending.send().await, "POST", &url).await?;
        Ok(())
    }

    /// `PUT /X/{id}`
    pub async fn update<R: Resource>(&self, id: i64, request: &R::Request) -> Result<(), ApiError> {
        let url = self.url(&R::ENDPOINT.item_path(id));
        Logger::debug_with_component(COMPONENT, &format!("PUT {}", url));
        let pending = Request::put(&url)
            .json(request)
            .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))?;
        Self::check(pending.send().await, "PUT", &url).await?;
        Ok(())
    }

    /// `DELETE /X/{id}`
    pub async fn delete<R: Resource>(&self, id: i64) -> Result<(), ApiError> {
        let url = self.url(&R::ENDPOINT.item_path(id));
        Logger::debug_with_component(COMPONENT, &format!("DELETE {}", url));
        Self::check(Request::delete(&url).send().await, "DELETE", &url).await?;
        Ok(())
    }

    async fn check(
        result: Result<Response, gloo::net::Error>,
        method: &str,
        url: &str,
    ) -> Result<Response, ApiError> {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                Logger::error_with_component(
                    COMPONENT,
                    &format!("{} {} failed: {}", method, url, e),
                );
                return Err(ApiError::Connection(e.to_string()));
            }
        };

        if response.ok() {
            return Ok(response);
        }

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let error = ApiError::from_status(status, body);
        Logger::error_with_component(COMPONENT, &format!("{} {} -> {}", method, url, error));
        Err(error)
    }

    async fn decode<T: DeserializeOwned>(response: Response, url: &str) -> Result<T, ApiError> {
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| {
            Logger::error_with_component(
                COMPONENT,
                &format!("Failed to parse response from {}: {}", url, e),
            );
            ApiError::Decode(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_trailing_slash_is_stripped() {
        let config = ConsoleConfig {
            api_base_url: "http://localhost:8080/".to_string(),
            ..ConsoleConfig::default()
        };
        let client = ApiClient::from_config(&config);
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/Hoteles/Listar"), "http://localhost:8080/Hoteles/Listar");
    }

    #[wasm_bindgen_test]
    fn test_from_config() {
        let config = ConsoleConfig::from_overrides(Some("https://api.example.cl"), None);
        let client = ApiClient::from_config(&config);
        assert_eq!(client.base_url(), "https://api.example.cl");
    }
}
