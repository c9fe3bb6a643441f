use core_logic::{ProxyEndpoint, ProxyKind, ProxyManager};
use std::io::Write;

#[test]
fn test_parse_http_scheme() {
    let endpoint = ProxyEndpoint::parse("http://10.0.0.1:8080").unwrap();
    assert_eq!(endpoint.url, "http://10.0.0.1:8080");
    assert_eq!(endpoint.kind, ProxyKind::Http);
}

#[test]
fn test_parse_socks_schemes() {
    let socks5 = ProxyEndpoint::parse("socks5://10.0.0.1:1080").unwrap();
    assert_eq!(socks5.kind, ProxyKind::Socks);

    let socks4 = ProxyEndpoint::parse("socks4://10.0.0.1:1080").unwrap();
    assert_eq!(socks4.kind, ProxyKind::Socks);
}

#[test]
fn test_parse_bare_host_port_defaults_to_http() {
    let endpoint = ProxyEndpoint::parse("1.1.1.1:8080").unwrap();
    assert_eq!(endpoint.url, "http://1.1.1.1:8080");
    assert_eq!(endpoint.kind, ProxyKind::Http);
}

#[test]
fn test_parse_unsupported_scheme_rejected() {
    assert!(ProxyEndpoint::parse("ftp://10.0.0.1:21").is_none());
    assert!(ProxyEndpoint::parse("quic://10.0.0.1:443").is_none());
}

#[test]
fn test_parse_empty_line_rejected() {
    assert!(ProxyEndpoint::parse("").is_none());
    assert!(ProxyEndpoint::parse("   ").is_none());
}

#[test]
fn test_load_proxies_missing_file_is_empty() {
    let proxies = ProxyManager::load_proxies("does-not-exist.txt").unwrap();
    assert!(proxies.is_empty());
}

#[test]
fn test_load_proxies_skips_comments_and_bad_lines() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# fleet proxies").unwrap();
    writeln!(file, "http://10.0.0.1:8080").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "ftp://10.0.0.2:21").unwrap();
    writeln!(file, "socks5://10.0.0.3:1080").unwrap();
    writeln!(file, "10.0.0.4:3128").unwrap();
    file.flush().unwrap();

    let proxies = ProxyManager::load_proxies(file.path().to_str().unwrap()).unwrap();
    assert_eq!(proxies.len(), 3);
    assert_eq!(proxies[0].url, "http://10.0.0.1:8080");
    assert_eq!(proxies[1].kind, ProxyKind::Socks);
    assert_eq!(proxies[2].url, "http://10.0.0.4:3128");
}

#[test]
fn test_load_proxies_preserves_file_order() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "1.1.1.1:8080").unwrap();
    writeln!(file, "2.2.2.2:8080").unwrap();
    file.flush().unwrap();

    let proxies = ProxyManager::load_proxies(file.path().to_str().unwrap()).unwrap();
    let urls: Vec<&str> = proxies.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls, vec!["http://1.1.1.1:8080", "http://2.2.2.2:8080"]);
}
