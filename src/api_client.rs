use orchestrate::{ApiSession, ResourceError, Result};
use serde_json::Value;

/// Blocking HTTP client for the provisioning API.
///
/// All resource kinds share one client; requests are plain JSON over
/// REST and a missing object is reported as `Ok(None)` rather than an
/// error so callers can distinguish "confirmed absent" from "unknown".
#[derive(Debug)]
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            base_url: base_url.into(),
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// GET a single object. A 404 means the object does not exist.
    pub fn get(&self, path: &str) -> Result<Option<Value>> {
        let url = self.url(path);
        log::debug!("GET {url}");
        let mut request = self.agent.get(&url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }
        match request.call() {
            Ok(mut response) => {
                let body: Value = response
                    .body_mut()
                    .read_json()
                    .map_err(|e| ResourceError::api(format!("invalid response body: {e}")))?;
                Ok(Some(body))
            }
            Err(ureq::Error::StatusCode(404)) => Ok(None),
            Err(e) => Err(to_api_error(&url, &e)),
        }
    }

    /// POST a JSON body, returning the created object.
    pub fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.url(path);
        log::debug!("POST {url}");
        let mut request = self.agent.post(&url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }
        let mut response = request
            .send_json(body)
            .map_err(|e| to_api_error(&url, &e))?;
        response
            .body_mut()
            .read_json()
            .map_err(|e| ResourceError::api(format!("invalid response body: {e}")))
    }

    /// PUT a JSON body, returning the updated object.
    pub fn put(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.url(path);
        log::debug!("PUT {url}");
        let mut request = self.agent.put(&url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }
        let mut response = request
            .send_json(body)
            .map_err(|e| to_api_error(&url, &e))?;
        response
            .body_mut()
            .read_json()
            .map_err(|e| ResourceError::api(format!("invalid response body: {e}")))
    }

    /// DELETE an object. Some endpoints return an empty body on success.
    pub fn delete(&self, path: &str) -> Result<Value> {
        let url = self.url(path);
        log::debug!("DELETE {url}");
        let mut request = self.agent.delete(&url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }
        let mut response = request.call().map_err(|e| to_api_error(&url, &e))?;
        Ok(response.body_mut().read_json().unwrap_or(Value::Null))
    }
}

fn to_api_error(url: &str, err: &ureq::Error) -> ResourceError {
    match err {
        ureq::Error::StatusCode(code) => {
            ResourceError::api(format!("{url} returned status {code}"))
        }
        other => ResourceError::api(format!("{url}: {other}")),
    }
}

impl ApiSession for ApiClient {
    fn is_ready(&self) -> bool {
        !self.base_url.is_empty()
    }
}
