//! JSON over HTTP, with a timeout.
//!
//! The actual network access goes through a [`Transport`], so that the
//! logic here (url building, status checks, decoding) can be exercised
//! without sockets.

use crate::errors::{Error, Result};
use crate::settings::ClientSettings;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;

const JSON_CONTENT_TYPE: &str = "application/json";

/// A fully prepared call, ready to be sent.
#[derive(Clone, Debug, PartialEq)]
pub struct OutgoingRequest {
    pub method: Method,
    pub url: String,

    // Already encoded as JSON
    pub body: Option<String>,
}

/// What came back from the server, before any interpretation.
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|c| c.contains(JSON_CONTENT_TYPE))
    }
}

/// A decoded response body
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Json(Value),
    Text(String),
}

impl Body {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(v) => Some(v),
            Body::Text(_) => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            Body::Json(v) => Some(v),
            Body::Text(_) => None,
        }
    }
}

pub trait Transport {
    /// Perform the call and read the whole body.  Dropping the returned
    /// future must abort the call.
    fn send(
        &self,
        request: OutgoingRequest,
    ) -> impl Future<Output = Result<RawResponse>>;
}

/// The transport used outside of tests, based on reqwest.
#[derive(Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        // No timeout here, this is handled by the Client so that it applies
        // to all transports.
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;
        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

pub struct Client<T: Transport = HttpTransport> {
    transport: T,
    settings: ClientSettings,
}

impl Client<HttpTransport> {
    pub fn new(settings: ClientSettings) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new()?, settings))
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(transport: T, settings: ClientSettings) -> Self {
        Client {
            transport,
            settings,
        }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Relative paths are prefixed with the base url, absolute ones are
    /// kept as is.
    pub fn full_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.settings.base_url, path)
        }
    }

    /// Send a request and decode the response.  Errors are logged, then
    /// returned.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<Body> {
        let url = self.full_url(path);
        log::debug!("{} {}", method, url);

        let result = self
            .send_with_timeout(OutgoingRequest {
                method: method.clone(),
                url: url.clone(),
                body,
            })
            .await
            .and_then(decode);
        if let Err(e) = &result {
            log::error!("Request failed: {} {}: {}", method, url, e);
        }
        result
    }

    pub async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Body> {
        self.request(Method::GET, &with_query(path, params), None)
            .await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Body> {
        let body = serde_json::to_string(body)?;
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Body> {
        let body = serde_json::to_string(body)?;
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Body> {
        self.request(Method::DELETE, path, None).await
    }

    /// Dropping the transport future when the delay expires aborts the call,
    /// and the timer is dropped along with the timeout future either way.
    async fn send_with_timeout(
        &self,
        request: OutgoingRequest,
    ) -> Result<RawResponse> {
        let timeout = self.settings.timeout;
        match tokio::time::timeout(timeout, self.transport.send(request)).await
        {
            Ok(response) => response,
            Err(_) => Err(Error::Timeout(timeout)),
        }
    }
}

fn decode(response: RawResponse) -> Result<Body> {
    if !response.is_success() {
        return Err(Error::HttpStatus(response.status));
    }
    if response.is_json() {
        Ok(Body::Json(serde_json::from_str(&response.body)?))
    } else {
        Ok(Body::Text(response.body))
    }
}

/// Append the query string, where both keys and values are percent-encoded.
pub fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = params
        .iter()
        .map(|(k, v)| {
            format!("{}={}", urlencoding::encode(k), urlencoding::encode(v))
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", path, query)
}
