use std::fs;

use reqwest::Client;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::SweetClientError;
use crate::{AuthResponse, PurchaseReceipt, Sweet};

const TOKEN_FILE: &str = ".sweet_token";

#[derive(Debug, Deserialize)]
struct MessageResponse {
    message: String,
}

#[derive(Clone)]
pub struct SweetClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl SweetClient {
    pub fn connect(endpoint: &str) -> Result<Self, SweetClientError> {
        let base_url = endpoint.trim_end_matches('/').to_string();
        Ok(Self {
            client: Client::builder().build()?,
            base_url,
            token: None,
        })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn remember_token(&mut self, token: &str) -> Result<(), SweetClientError> {
        self.token = Some(token.to_owned());
        fs::write(TOKEN_FILE, token)?;
        Ok(())
    }

    fn auth_header(&self) -> Result<reqwest::header::HeaderValue, SweetClientError> {
        // Fall back to the token file so a fresh process can reuse the last login.
        let token = match &self.token {
            Some(t) if !t.is_empty() => t.clone(),
            _ => fs::read_to_string(TOKEN_FILE)
                .map(|t| t.trim().to_string())
                .map_err(|_| SweetClientError::Unauthorized)?,
        };

        if token.is_empty() {
            return Err(SweetClientError::Unauthorized);
        }

        reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| SweetClientError::Unauthorized)
    }

    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) -> Result<AuthResponse, SweetClientError> {
        let mut body = serde_json::json!({
            "email": email,
            "password": password,
        });
        if let Some(role) = role {
            body["role"] = serde_json::Value::String(role.to_owned());
        }

        let resp = self
            .client
            .post(format!("{}/api/auth/register", self.base_url))
            .json(&body)
            .send()
            .await?;

        if resp.status().is_success() {
            let auth: AuthResponse = resp.json().await?;
            self.remember_token(&auth.token)?;
            Ok(auth)
        } else {
            Err(SweetClientError::from_http_response(resp).await)
        }
    }

    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, SweetClientError> {
        let resp = self
            .client
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        if resp.status().is_success() {
            let auth: AuthResponse = resp.json().await?;
            self.remember_token(&auth.token)?;
            Ok(auth)
        } else {
            Err(SweetClientError::from_http_response(resp).await)
        }
    }

    pub async fn list_sweets(&self) -> Result<Vec<Sweet>, SweetClientError> {
        let resp = self
            .client
            .get(format!("{}/api/sweets", self.base_url))
            .header(reqwest::header::AUTHORIZATION, self.auth_header()?)
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(SweetClientError::from_http_response(resp).await)
        }
    }

    pub async fn search_sweets(&self, query: &str) -> Result<Vec<Sweet>, SweetClientError> {
        let resp = self
            .client
            .get(format!("{}/api/sweets/search", self.base_url))
            .query(&[("q", query)])
            .header(reqwest::header::AUTHORIZATION, self.auth_header()?)
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(SweetClientError::from_http_response(resp).await)
        }
    }

    pub async fn create_sweet(
        &self,
        name: &str,
        category: &str,
        price: f64,
        quantity: Option<i32>,
    ) -> Result<Sweet, SweetClientError> {
        let resp = self
            .client
            .post(format!("{}/api/sweets", self.base_url))
            .header(reqwest::header::AUTHORIZATION, self.auth_header()?)
            .json(&serde_json::json!({
                "name": name,
                "category": category,
                "price": price,
                "quantity": quantity,
            }))
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(SweetClientError::from_http_response(resp).await)
        }
    }

    pub async fn update_sweet(
        &self,
        id: Uuid,
        name: Option<&str>,
        category: Option<&str>,
        price: Option<f64>,
        quantity: Option<i32>,
    ) -> Result<Sweet, SweetClientError> {
        let resp = self
            .client
            .put(format!("{}/api/sweets/{}", self.base_url, id))
            .header(reqwest::header::AUTHORIZATION, self.auth_header()?)
            .json(&serde_json::json!({
                "name": name,
                "category": category,
                "price": price,
                "quantity": quantity,
            }))
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(SweetClientError::from_http_response(resp).await)
        }
    }

    pub async fn delete_sweet(&self, id: Uuid) -> Result<String, SweetClientError> {
        let resp = self
            .client
            .delete(format!("{}/api/sweets/{}", self.base_url, id))
            .header(reqwest::header::AUTHORIZATION, self.auth_header()?)
            .send()
            .await?;

        if resp.status().is_success() {
            let body: MessageResponse = resp.json().await?;
            Ok(body.message)
        } else {
            Err(SweetClientError::from_http_response(resp).await)
        }
    }

    pub async fn purchase_sweet(&self, id: Uuid) -> Result<PurchaseReceipt, SweetClientError> {
        let resp = self
            .client
            .post(format!("{}/api/sweets/{}/purchase", self.base_url, id))
            .header(reqwest::header::AUTHORIZATION, self.auth_header()?)
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(SweetClientError::from_http_response(resp).await)
        }
    }
}
