use core_logic::{ConfigError, CoreError, NetworkError, WalletError};

#[test]
fn test_network_error_display() {
    let err = NetworkError::HttpError {
        status_code: 429,
        endpoint: "https://example.invalid/api".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "HTTP error 429 from https://example.invalid/api"
    );

    let err = NetworkError::Timeout {
        timeout_ms: 5000,
        endpoint: "https://example.invalid".to_string(),
    };
    assert!(err.to_string().contains("5000ms"));
}

#[test]
fn test_core_error_is_transparent_over_sources() {
    let inner = ConfigError::NoWallets {
        hint: "run register first".to_string(),
    };
    let unified: CoreError = inner.into();
    assert!(unified.to_string().contains("run register first"));

    let unified: CoreError = WalletError::InvalidKeyFormat.into();
    assert!(unified.to_string().contains("private key"));
}

#[test]
fn test_network_error_converts_to_anyhow() {
    fn fails() -> anyhow::Result<()> {
        Err(NetworkError::InvalidResponse {
            endpoint: "https://example.invalid".to_string(),
            reason: "truncated body".to_string(),
        }
        .into())
    }

    let msg = format!("{:#}", fails().unwrap_err());
    assert!(msg.contains("truncated body"));
}
