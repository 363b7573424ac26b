use std::env;

/// Reads an environment variable, falling back to `default` when unset *or*
/// empty — matching the source's `tools.GetEnv(name, default)` convention,
/// where an empty override is treated the same as no override.
pub fn get_env(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

/// Normalizes a Go-style `net.Listen` shorthand address (`:9090`) to a form
/// `std::net::ToSocketAddrs` understands (`0.0.0.0:9090`). Addresses that
/// already carry a host are returned unchanged.
pub fn normalize_listen_addr(addr: &str) -> String {
    match addr.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => addr.to_string(),
    }
}
