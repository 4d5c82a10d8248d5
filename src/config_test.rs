use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    let cfg = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, ServerConfig::default());
    assert_eq!(cfg.listen_addr().to_string(), "0.0.0.0:3000");
}

#[test]
fn parses_overrides() {
    let cfg = ServerConfig::from_lookup(lookup_from(&[
        ("PORT", "8080"),
        ("BIND_ADDR", "127.0.0.1"),
        ("CLIENT_QUEUE_CAPACITY", " 16 "),
    ]))
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.client_queue_capacity, 16);
    assert_eq!(cfg.listen_addr().to_string(), "127.0.0.1:8080");
}

#[test]
fn rejects_bad_port() {
    let err = ServerConfig::from_lookup(lookup_from(&[("PORT", "70000")])).unwrap_err();
    let ConfigError::Invalid { var, value, .. } = err;
    assert_eq!(var, "PORT");
    assert_eq!(value, "70000");
}

#[test]
fn rejects_bad_bind_addr() {
    let err = ServerConfig::from_lookup(lookup_from(&[("BIND_ADDR", "localhost")])).unwrap_err();
    assert!(err.to_string().starts_with("invalid BIND_ADDR"));
}

#[test]
fn rejects_zero_queue_capacity() {
    let err = ServerConfig::from_lookup(lookup_from(&[("CLIENT_QUEUE_CAPACITY", "0")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "CLIENT_QUEUE_CAPACITY", .. }));
}
