//! Blocking HTTP transport with explicit cookie handling
//!
//! Redirects are followed by hand so that every `Set-Cookie` header along
//! the way lands in the persisted [`CookieStore`] — the built-in redirect
//! policy would swallow intermediate responses. The session bootstrap also
//! needs a deliberately non-following GET to classify the validation probe.

use crate::session::cookies::CookieStore;
use crate::{Result, config::Settings};
use reqwest::Method;
use reqwest::blocking::{Client, Response};
use reqwest::header::{COOKIE, LOCATION, SET_COOKIE};
use reqwest::redirect::Policy;
use std::sync::RwLock;
use std::time::Duration;
use url::Url;

const MAX_REDIRECTS: u8 = 10;

/// Authenticated transport shared by the session manager and the extractor
///
/// All I/O is synchronous and sequential; the store lock never contends
/// because there is exactly one logical thread of control.
#[derive(Debug)]
pub struct Transport {
    client: Client,
    cookies: RwLock<CookieStore>,
}

impl Transport {
    /// Build a transport from network settings
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(settings.network.user_agent.clone())
            .redirect(Policy::none())
            .connect_timeout(Duration::from_secs(settings.network.connect_timeout))
            .timeout(Duration::from_secs(settings.network.request_timeout))
            .build()?;

        Ok(Self {
            client,
            cookies: RwLock::new(CookieStore::new()),
        })
    }

    /// Replace the cookie store wholesale (used when loading a persisted jar)
    pub fn replace_cookie_store(&self, store: CookieStore) {
        let mut cookies = self.cookies.write().expect("cookie store lock poisoned");
        *cookies = store;
    }

    /// Snapshot of the current cookie store
    pub fn cookie_store(&self) -> CookieStore {
        self.cookies.read().expect("cookie store lock poisoned").clone()
    }

    /// GET a page, following redirects, and return the response body
    pub fn get(&self, url: &str) -> Result<String> {
        let target = Url::parse(url)?;
        let response = self.request_following(Method::GET, target, None)?;
        Ok(response.text()?)
    }

    /// GET without following redirects; returns the first response body
    ///
    /// The cookie validation probe classifies the body text of the immediate
    /// response, so a redirect must not be chased here.
    pub fn get_no_redirect(&self, url: &str) -> Result<String> {
        let target = Url::parse(url)?;
        let response = self.execute(Method::GET, target, None)?;
        Ok(response.text()?)
    }

    /// POST an urlencoded form, following redirects (as GET), and return the
    /// final response body
    pub fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String> {
        let target = Url::parse(url)?;
        let response = self.request_following(Method::POST, target, Some(form))?;
        Ok(response.text()?)
    }

    fn request_following(
        &self,
        method: Method,
        url: Url,
        form: Option<&[(&str, &str)]>,
    ) -> Result<Response> {
        let mut current = url;
        let mut response = self.execute(method, current.clone(), form)?;

        let mut hops = 0u8;
        while response.status().is_redirection() {
            hops += 1;
            if hops > MAX_REDIRECTS {
                return Err(std::io::Error::other(format!(
                    "redirect limit ({}) exceeded at {}",
                    MAX_REDIRECTS, current
                ))
                .into());
            }

            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .ok_or_else(|| {
                    std::io::Error::other(format!("redirect without Location at {}", current))
                })?;
            current = current.join(location)?;
            tracing::debug!("Following redirect to {}", current);

            // Post-redirect requests are plain GETs, like a browser would issue
            response = self.execute(Method::GET, current.clone(), None)?;
        }

        Ok(response)
    }

    fn execute(
        &self,
        method: Method,
        url: Url,
        form: Option<&[(&str, &str)]>,
    ) -> Result<Response> {
        let host = url.host_str().unwrap_or_default().to_string();
        let https = url.scheme() == "https";

        let mut builder = self.client.request(method, url.clone());
        let header = {
            let cookies = self.cookies.read().expect("cookie store lock poisoned");
            cookies.cookie_header_for(&host, url.path(), https)
        };
        if let Some(header) = header {
            builder = builder.header(COOKIE, header);
        }
        if let Some(form) = form {
            builder = builder.form(form);
        }

        let response = builder.send()?;

        let mut cookies = self.cookies.write().expect("cookie store lock poisoned");
        for value in response.headers().get_all(SET_COOKIE) {
            if let Ok(raw) = value.to_str() {
                cookies.ingest_set_cookie(&host, raw);
            }
        }

        Ok(response)
    }
}
