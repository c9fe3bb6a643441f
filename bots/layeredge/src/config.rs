use anyhow::Result;
use config::{Config, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct BotConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_ref_code")]
    pub ref_code: String,
    #[serde(default = "default_wallets_file")]
    pub wallets_file: String,
    #[serde(default = "default_proxies_file")]
    pub proxies_file: String,
    /// Per-request timeout, fixed at client construction.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Total attempt budget per request.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Flat pause between attempts.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// "What is my IP" endpoint used to probe candidate proxies.
    #[serde(default = "default_proxy_test_url")]
    pub proxy_test_url: String,
    #[serde(default = "default_proxy_test_timeout_secs")]
    pub proxy_test_timeout_secs: u64,
    /// Inter-cycle waits, rotated in order after each full wallet pass.
    #[serde(default = "default_wait_minutes")]
    pub wait_minutes: Vec<u64>,
}

fn default_base_url() -> String {
    "https://referralapi.layeredge.io".to_string()
}

fn default_ref_code() -> String {
    "ktb8KRwH".to_string()
}

fn default_wallets_file() -> String {
    "wallets.json".to_string()
}

fn default_proxies_file() -> String {
    "proxies.txt".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    30
}

fn default_retry_delay_ms() -> u64 {
    2000
}

fn default_proxy_test_url() -> String {
    "https://api.ipify.org?format=json".to_string()
}

fn default_proxy_test_timeout_secs() -> u64 {
    5
}

fn default_wait_minutes() -> Vec<u64> {
    vec![25, 34, 90]
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            ref_code: default_ref_code(),
            wallets_file: default_wallets_file(),
            proxies_file: default_proxies_file(),
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            proxy_test_url: default_proxy_test_url(),
            proxy_test_timeout_secs: default_proxy_test_timeout_secs(),
            wait_minutes: default_wait_minutes(),
        }
    }
}

impl BotConfig {
    /// Loads the TOML config; a missing file falls back to the defaults so
    /// the bot runs out of the box next to wallets.json and proxies.txt.
    pub fn load(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .build()?;

        settings.try_deserialize().map_err(|e| anyhow::anyhow!(e))
    }
}
