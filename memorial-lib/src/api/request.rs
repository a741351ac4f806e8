//! Request execution
//!
//! Every call to the API goes through [`AdminClient::request`], which attaches
//! the session's bearer token and the JSON headers and turns non-success
//! responses into [`ApiError::Http`].

use reqwest::Method;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde::de::DeserializeOwned;
use url::Url;

use crate::AdminClient;
use crate::error::ApiError;
use crate::error::Error;

/// Headers sent with every request.
pub(crate) fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Content-Type", HeaderValue::from_static("application/json"));
    headers.insert("Accept", HeaderValue::from_static("application/json"));
    headers
}

impl AdminClient {
    /// Makes an authorized HTTP request.
    ///
    /// Fails with an [`AuthError`](crate::error::AuthError) before any network
    /// I/O when the session has no usable token.
    pub(crate) async fn request(
        &self,
        method: Method,
        url: Url,
        body: Option<String>,
    ) -> Result<reqwest::Response, Error> {
        let token = self.inner.session.bearer().await?;
        self.send(method, url, body, Some(&token.access_token)).await
    }

    /// Sends a request, with or without a bearer token.
    pub(crate) async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<String>,
        bearer: Option<&str>,
    ) -> Result<reqwest::Response, Error> {
        log::debug!("{} {}", method, url);

        let mut request = self
            .inner
            .http_client
            .request(method.clone(), url.clone())
            .headers(default_headers());

        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                if let Some(timeout) = self.inner.timeout {
                    return ApiError::Timeout(timeout);
                }
            }
            ApiError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                log::debug!("Could not read error body of {} {}: {}", method, url, e);
                String::new()
            }
        };
        let err = ApiError::from_body(status.as_u16(), &body);
        log::warn!("{} {} failed: {}", method, url, err);
        Err(Error::Api(err))
    }
}

/// Reads a successful response body as JSON.
pub(crate) async fn read_json(response: reqwest::Response) -> Result<serde_json::Value, ApiError> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| ApiError::parse_with_body(e.to_string(), text))
}

/// Deserializes a single entity, unwrapping it from `{<key>: {...}}` when the
/// API wraps it.
pub(crate) fn unwrap_entity<T: DeserializeOwned>(
    body: serde_json::Value,
    key: &str,
) -> Result<T, ApiError> {
    let value = match body {
        serde_json::Value::Object(mut map) if map.get(key).is_some_and(|v| v.is_object()) => {
            map.remove(key).unwrap_or_default()
        }
        serde_json::Value::Object(mut map)
            if map.get("data").is_some_and(|v| v.is_object()) && !map.contains_key("_id") =>
        {
            map.remove("data").unwrap_or_default()
        }
        other => other,
    };
    let raw = value.to_string();
    serde_json::from_value(value).map_err(|e| ApiError::parse_with_body(e.to_string(), raw))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        #[serde(rename = "_id")]
        id: String,
    }

    #[test]
    fn test_default_headers() {
        let headers = default_headers();
        assert_eq!(headers["Content-Type"], "application/json");
        assert_eq!(headers["Accept"], "application/json");
    }

    #[test]
    fn test_unwrap_entity_under_key() {
        let body = serde_json::json!({ "success": true, "faq": { "_id": "f1" } });
        let item: Item = unwrap_entity(body, "faq").unwrap();
        assert_eq!(item, Item { id: "f1".into() });
    }

    #[test]
    fn test_unwrap_entity_under_data() {
        let body = serde_json::json!({ "data": { "_id": "f2" } });
        let item: Item = unwrap_entity(body, "faq").unwrap();
        assert_eq!(item.id, "f2");
    }

    #[test]
    fn test_unwrap_bare_entity() {
        let body = serde_json::json!({ "_id": "f3" });
        let item: Item = unwrap_entity(body, "faq").unwrap();
        assert_eq!(item.id, "f3");
    }

    #[test]
    fn test_unwrap_entity_parse_error_keeps_body() {
        let body = serde_json::json!({ "faq": { "name": "no id" } });
        match unwrap_entity::<Item>(body, "faq") {
            Err(ApiError::Parse { body: Some(body), .. }) => assert!(body.contains("no id")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
