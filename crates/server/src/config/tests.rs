use super::*;

#[test]
fn empty_config_uses_defaults() {
    let config: DocshelfConfig = toml::from_str("").unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.store.backend, "memory");
    assert!(config.store.url.is_none());
}

#[test]
fn server_section_overrides() {
    let toml = r#"
        [server]
        host = "0.0.0.0"
        port = 9090
    "#;

    let config: DocshelfConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9090);
    // Untouched sections still get defaults.
    assert_eq!(config.store.backend, "memory");
}

#[test]
fn postgres_store_section() {
    let toml = r#"
        [store]
        backend = "postgres"
        url = "postgres://docshelf:secret@db:5432/docshelf"
        pool_size = 10
        schema = "docs"
        table_prefix = "app_"
        ssl_mode = "require"
    "#;

    let config: DocshelfConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.store.backend, "postgres");
    assert_eq!(
        config.store.url.as_deref(),
        Some("postgres://docshelf:secret@db:5432/docshelf")
    );
    assert_eq!(config.store.pool_size, Some(10));
    assert_eq!(config.store.schema.as_deref(), Some("docs"));
    assert_eq!(config.store.table_prefix.as_deref(), Some("app_"));
    assert_eq!(config.store.ssl_mode.as_deref(), Some("require"));
    assert!(config.store.ssl_root_cert.is_none());
}
