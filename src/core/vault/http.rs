//! Vault HTTP API client.

use std::collections::BTreeMap;

use reqwest::blocking::{Client, Response};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info, trace};
use zeroize::Zeroizing;

use super::{write_body, KvData, Vault, VaultAuth};
use crate::core::constants::APPROLE_LOGIN_PATH;
use crate::error::{Result, StoreError};

/// Vault reached over its HTTP API, authenticated with a client token.
pub struct HttpVault {
    addr: String,
    token: Zeroizing<String>,
    client: Client,
}

impl std::fmt::Debug for HttpVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpVault")
            .field("addr", &self.addr)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct ReadResponse {
    #[serde(default)]
    data: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    auth: Option<LoginAuth>,
}

#[derive(Deserialize)]
struct LoginAuth {
    #[serde(default)]
    client_token: String,
}

impl HttpVault {
    /// Build the HTTP client and obtain a token.
    ///
    /// Token auth is used as given; AppRole exchanges role-id and secret-id
    /// for a client token.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Auth` if AppRole login fails.
    pub fn connect(addr: &str, auth: VaultAuth) -> Result<Self> {
        info!(addr = %addr, "instantiating vault API client");

        let client = Client::builder()
            .build()
            .map_err(|e| StoreError::Request(format!("failed to build HTTP client: {e}")))?;

        let token = match auth {
            VaultAuth::Token(token) => {
                info!("using token based authentication");
                Zeroizing::new(token)
            }
            VaultAuth::AppRole { role_id, secret_id } => {
                info!("using AppRole based authentication");
                Self::approle_login(&client, addr, &role_id, &secret_id)?
            }
        };

        Ok(Self {
            addr: addr.to_string(),
            token,
            client,
        })
    }

    fn url(addr: &str, path: &str) -> String {
        format!(
            "{}/v1/{}",
            addr.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn approle_login(
        client: &Client,
        addr: &str,
        role_id: &str,
        secret_id: &str,
    ) -> Result<Zeroizing<String>> {
        let response = client
            .post(Self::url(addr, APPROLE_LOGIN_PATH))
            .json(&json!({ "role_id": role_id, "secret_id": secret_id }))
            .send()
            .map_err(|e| StoreError::Auth(format!("approle login request failed: {e}")))?;

        let status = response.status();
        let body = response.text().unwrap_or_default();
        if !status.is_success() {
            return Err(StoreError::Auth(format!("approle login failed: {status} {body}")).into());
        }

        let parsed: LoginResponse = serde_json::from_str(&body)
            .map_err(|e| StoreError::Auth(format!("failed to decode login response: {e}")))?;

        match parsed.auth {
            Some(auth) if !auth.client_token.is_empty() => {
                info!("obtained a token via AppRole");
                Ok(Zeroizing::new(auth.client_token))
            }
            _ => Err(StoreError::Auth("no authentication data is returned from vault".into()).into()),
        }
    }

    fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Response> {
        let mut builder = self
            .client
            .request(method, Self::url(&self.addr, path))
            .header("X-Vault-Token", self.token.as_str());
        if let Some(payload) = body {
            builder = builder.json(payload);
        }
        builder
            .send()
            .map_err(|e| StoreError::Request(format!("vault request on '{path}' failed: {e}")).into())
    }
}

impl Vault for HttpVault {
    fn read(&self, path: &str, key: &str) -> Result<Vec<u8>> {
        debug!(path = %path, key = %key, "reading data from vault");

        let response = self.request(Method::GET, path, None)?;
        let not_found = || StoreError::NotFound {
            path: path.to_string(),
            key: key.to_string(),
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(not_found().into());
        }
        let body = response.text().unwrap_or_default();
        if !status.is_success() {
            return Err(StoreError::Request(format!("read '{path}' failed: {status} {body}")).into());
        }

        let parsed: ReadResponse = serde_json::from_str(&body)
            .map_err(|e| StoreError::Decode(format!("failed to decode read of '{path}': {e}")))?;
        let data = match parsed.data {
            Some(data) if !data.is_empty() => KvData::from_response(data),
            _ => return Err(not_found().into()),
        };
        if data.is_enveloped() {
            debug!(path = %path, "unwrapped KV v2 envelope");
        }

        let value = data.extract(path, key)?;
        info!(path = %path, key = %key, bytes = value.len(), "obtained data from vault");
        Ok(value)
    }

    fn write(&self, path: &str, data: &BTreeMap<String, String>) -> Result<()> {
        info!(path = %path, keys = data.len(), "writing data to vault");
        let body = write_body(path, data);
        trace!(path = %path, "request body prepared");

        let response = self.request(Method::POST, path, Some(&body))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(StoreError::Request(format!("write '{path}' failed: {status} {body}")).into());
        }
        Ok(())
    }
}
