//! Persisted cookie store in Netscape cookie-jar format
//!
//! The portal session is re-established across runs from a text file with
//! one tab-separated line per cookie: domain, include-subdomains flag, path,
//! secure flag, expiry (unix seconds, 0 for session cookies), name, value.
//! The file is loaded at startup when present and fully rewritten after
//! every successful credential login.

use crate::{Error, Result};
use std::fmt::Write as _;
use std::path::Path;

/// File header line, kept for compatibility with browser-exported jars
const JAR_HEADER: &str = "# Netscape HTTP Cookie File";

/// One persisted cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieRecord {
    /// Cookie domain, without a leading dot
    pub domain: String,
    /// Whether the cookie applies to subdomains as well
    pub include_subdomains: bool,
    /// Path prefix the cookie applies to
    pub path: String,
    /// Whether the cookie is restricted to HTTPS
    pub secure: bool,
    /// Expiry as unix seconds; `None` for session cookies
    pub expires: Option<i64>,
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
}

impl CookieRecord {
    /// Whether this cookie is past its expiry at `now` (unix seconds)
    ///
    /// Session cookies never expire here; the server decides their fate,
    /// which is what the validation probe is for.
    pub fn is_expired(&self, now: i64) -> bool {
        matches!(self.expires, Some(t) if t <= now)
    }

    fn matches_domain(&self, host: &str) -> bool {
        if host == self.domain {
            return true;
        }
        self.include_subdomains && host.ends_with(&format!(".{}", self.domain))
    }

    fn matches_path(&self, request_path: &str) -> bool {
        request_path.starts_with(&self.path)
    }
}

/// Set of session cookies captured from the portal
///
/// Invariant: a loaded store is either fully usable (validated against the
/// portal) or triggers a fresh credential login; it is never partially
/// trusted.
#[derive(Debug, Clone, Default)]
pub struct CookieStore {
    records: Vec<CookieRecord>,
}

impl CookieStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cookies in the store
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no cookies
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the stored cookies
    pub fn records(&self) -> impl Iterator<Item = &CookieRecord> {
        self.records.iter()
    }

    /// Insert a cookie, replacing any existing one with the same
    /// (domain, path, name) triple
    pub fn upsert(&mut self, record: CookieRecord) {
        if let Some(existing) = self.records.iter_mut().find(|r| {
            r.domain == record.domain && r.path == record.path && r.name == record.name
        }) {
            *existing = record;
        } else {
            self.records.push(record);
        }
    }

    /// Absorb a `Set-Cookie` header received from `host`
    ///
    /// Unparseable header values are ignored, matching what browsers do.
    pub fn ingest_set_cookie(&mut self, host: &str, header: &str) {
        let Ok(parsed) = cookie::Cookie::parse(header) else {
            tracing::debug!("Ignoring unparseable Set-Cookie header from {}", host);
            return;
        };

        let now = chrono::Utc::now().timestamp();
        // Max-Age wins over Expires per RFC 6265
        let expires = if let Some(max_age) = parsed.max_age() {
            Some(now + max_age.whole_seconds())
        } else {
            parsed
                .expires_datetime()
                .map(|datetime| datetime.unix_timestamp())
        };

        let record = CookieRecord {
            domain: parsed
                .domain()
                .map(|d| d.trim_start_matches('.').to_string())
                .unwrap_or_else(|| host.to_string()),
            include_subdomains: parsed.domain().is_some(),
            path: parsed.path().unwrap_or("/").to_string(),
            secure: parsed.secure().unwrap_or(false),
            expires,
            name: parsed.name().to_string(),
            value: parsed.value().to_string(),
        };
        self.upsert(record);
    }

    /// Build the `Cookie` request header for a request to `host` at
    /// `request_path`, or `None` when no stored cookie applies
    pub fn cookie_header_for(&self, host: &str, request_path: &str, https: bool) -> Option<String> {
        let now = chrono::Utc::now().timestamp();
        let mut header = String::new();
        for record in &self.records {
            if !record.matches_domain(host) || !record.matches_path(request_path) {
                continue;
            }
            if record.secure && !https {
                continue;
            }
            if record.is_expired(now) {
                continue;
            }
            if !header.is_empty() {
                header.push_str("; ");
            }
            let _ = write!(header, "{}={}", record.name, record.value);
        }
        if header.is_empty() { None } else { Some(header) }
    }

    /// Load a store from a Netscape-format cookie jar file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse the Netscape cookie-jar text format
    pub fn parse(content: &str) -> Result<Self> {
        let mut store = Self::new();
        for (index, raw_line) in content.lines().enumerate() {
            // curl marks HttpOnly cookies with a prefix that would otherwise
            // read as a comment
            let line = raw_line.strip_prefix("#HttpOnly_").unwrap_or(raw_line);
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != 7 {
                return Err(Error::cookie_jar(
                    index + 1,
                    format!("expected 7 tab-separated fields, got {}", fields.len()),
                ));
            }

            let expires: i64 = fields[4].parse().map_err(|_| {
                Error::cookie_jar(index + 1, format!("invalid expiry: {:?}", fields[4]))
            })?;

            store.records.push(CookieRecord {
                domain: fields[0].trim_start_matches('.').to_string(),
                include_subdomains: fields[1].eq_ignore_ascii_case("TRUE"),
                path: fields[2].to_string(),
                secure: fields[3].eq_ignore_ascii_case("TRUE"),
                expires: if expires == 0 { None } else { Some(expires) },
                name: fields[5].to_string(),
                value: fields[6].to_string(),
            });
        }
        Ok(store)
    }

    /// Serialize the store to the Netscape cookie-jar text format
    pub fn serialize(&self) -> String {
        let mut out = String::from(JAR_HEADER);
        out.push('\n');
        for record in &self.records {
            let _ = writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                record.domain,
                if record.include_subdomains { "TRUE" } else { "FALSE" },
                record.path,
                if record.secure { "TRUE" } else { "FALSE" },
                record.expires.unwrap_or(0),
                record.name,
                record.value,
            );
        }
        out
    }

    /// Write the store to `path`, replacing any existing file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.serialize())?;
        Ok(())
    }
}
