//! HTTP access to GitHub hosts.
//!
//! [`ApiClient`] wraps an [`Octocrab`] instance bound to one host (the REST
//! API or the raw file mirror), with or without a bearer token. Every read
//! carries its own timeout, non-success statuses become errors, and bodies
//! go through the shared [`ResponseCache`] according to a [`CachePolicy`].

mod cache;
mod error;

pub use cache::{CachePolicy, ResponseCache};
pub use error::FetchError;

use cache::Lookup;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

/// A GitHub host plus the credential used against it.
#[derive(Clone)]
pub struct ApiClient {
    octocrab: Octocrab,
    base_url: Url,
    authenticated: bool,
    cache: ResponseCache,
}

impl ApiClient {
    /// Builds a client for `base_url`, authenticated when `token` is given.
    ///
    /// Requests are attempted once; falling back is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if octocrab rejects the base URI or fails to build.
    pub fn new(
        base_url: Url,
        token: Option<&str>,
        cache: ResponseCache,
    ) -> Result<Self, octocrab::Error> {
        let mut builder = Octocrab::builder()
            .base_uri(base_url.as_str())?
            .add_retry_config(RetryConfig::None);
        if let Some(token) = token {
            builder = builder.personal_token(token.to_string());
        }
        Ok(Self {
            octocrab: builder.build()?,
            base_url,
            authenticated: token.is_some(),
            cache,
        })
    }

    /// Whether requests carry a bearer token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Builds a URL on this host from unencoded path segments.
    #[must_use]
    pub fn endpoint<I>(&self, segments: I) -> Url
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        // Base URLs are validated as http(s) when configured, so they always have a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GETs `url` and deserializes the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on transport failure, timeout, non-success
    /// status or a body that does not deserialize into `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        timeout: Duration,
        policy: CachePolicy,
    ) -> Result<T, FetchError> {
        let body = self.get_text(url, timeout, policy).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// GETs `url` and returns the body as text.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on transport failure, timeout or non-success
    /// status. A cached body is never an error.
    pub async fn get_text(
        &self,
        url: &Url,
        timeout: Duration,
        policy: CachePolicy,
    ) -> Result<String, FetchError> {
        let CachePolicy::Revalidate(ttl) = policy else {
            return self.fetch(url, timeout).await;
        };

        let key = self.cache_key(url);
        match self.cache.lookup(&key, ttl) {
            Lookup::Fresh(body) => {
                trace!(url = %url, "Serving cached response");
                return Ok(body);
            }
            Lookup::Stale { body, refresh } => {
                if refresh {
                    self.spawn_refresh(key, url.clone(), timeout);
                }
                trace!(url = %url, refresh, "Serving stale response");
                return Ok(body);
            }
            Lookup::Miss => {}
        }

        let body = self.fetch(url, timeout).await?;
        self.cache.store(key, body.clone());
        Ok(body)
    }

    /// Refreshes a stale entry without holding up the caller.
    fn spawn_refresh(&self, key: String, url: Url, timeout: Duration) {
        let client = self.clone();
        tokio::spawn(async move {
            match client.fetch(&url, timeout).await {
                Ok(body) => {
                    debug!(url = %url, "Revalidated cached response");
                    client.cache.store(key, body);
                }
                Err(e) => {
                    debug!(url = %url, error = %e, "Revalidation failed, keeping stale response");
                    client.cache.abandon_refresh(&key);
                }
            }
        });
    }

    /// Performs the request with no cache involvement.
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<String, FetchError> {
        let request = async {
            let response = self.octocrab._get(url.as_str()).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }
            Ok::<_, FetchError>(self.octocrab.body_to_string(response).await?)
        };

        tokio::time::timeout(timeout, request)
            .await
            .map_err(|_| FetchError::Timeout {
                url: url.to_string(),
                timeout_ms: timeout.as_millis(),
            })?
    }

    fn cache_key(&self, url: &Url) -> String {
        let scope = if self.authenticated { "auth" } else { "anon" };
        format!("{scope} {url}")
    }
}
