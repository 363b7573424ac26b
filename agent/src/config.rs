use tunnel_core::{get_env, Error, Result};

/// Agent-side configuration, loaded once from the environment at startup.
pub struct Config {
    pub server_address: String,
    pub backend_address: String,
    pub conn_count: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let server_address = get_env("SERVER_ADDRESS", "127.0.0.1:9091");
        let backend_address = get_env("BACKEND_ADDRESS", "127.0.0.1:80");
        let conn_count_raw = get_env("CONN_COUNT", "20");

        let conn_count = conn_count_raw
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| Error::InvalidConnCount {
                value: conn_count_raw.clone(),
            })?;

        Ok(Self {
            server_address,
            backend_address,
            conn_count,
        })
    }
}
