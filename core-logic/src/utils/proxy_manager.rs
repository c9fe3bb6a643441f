use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Transport family for a proxy, resolved once at parse time so the URL
/// string never has to be re-inspected on the hot path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProxyKind {
    Http,
    Socks,
}

impl ProxyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyKind::Http => "http",
            ProxyKind::Socks => "socks",
        }
    }
}

/// A single outbound relay in `scheme://host:port` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyEndpoint {
    /// Normalized URL, always carrying a scheme.
    pub url: String,
    pub kind: ProxyKind,
}

impl ProxyEndpoint {
    /// Classifies one proxy line. Scheme-less `host:port` entries are treated
    /// as plain HTTP proxies. An unrecognized scheme logs one warning and the
    /// entry is rejected; proxying is an optimization, never a hard failure.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if line.starts_with("http://") {
            return Some(Self {
                url: line.to_string(),
                kind: ProxyKind::Http,
            });
        }

        if line.starts_with("socks4://") || line.starts_with("socks5://") {
            return Some(Self {
                url: line.to_string(),
                kind: ProxyKind::Socks,
            });
        }

        if line.contains("://") {
            warn!("Unsupported proxy type: {}", line);
            return None;
        }

        // Bare ip:port line, proxies.txt convention
        Some(Self {
            url: format!("http://{}", line),
            kind: ProxyKind::Http,
        })
    }
}

impl std::fmt::Display for ProxyEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url)
    }
}

pub struct ProxyManager;

impl ProxyManager {
    /// Loads proxies from a list file, one endpoint per line.
    /// A missing file means "run without proxies", not an error.
    pub fn load_proxies(path: &str) -> Result<Vec<ProxyEndpoint>> {
        let path_ref = Path::new(path);
        if !path_ref.exists() {
            warn!("{} not found. Running without proxies.", path);
            return Ok(Vec::new());
        }

        let content =
            fs::read_to_string(path_ref).with_context(|| format!("Failed to read {}", path))?;
        let mut proxies = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(endpoint) = ProxyEndpoint::parse(line) {
                proxies.push(endpoint);
            }
        }

        info!("Loaded {} proxies from {}", proxies.len(), path);
        Ok(proxies)
    }
}
