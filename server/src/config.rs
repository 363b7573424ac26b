use tunnel_core::{get_env, normalize_listen_addr};

/// Server-side configuration, loaded once from the environment at startup.
pub struct Config {
    pub server_addr: String,
    pub peer_addr: String,
}

impl Config {
    pub fn from_env() -> Self {
        let server_addr = normalize_listen_addr(&get_env("SERVER_PORT", ":9090"));
        let peer_addr = normalize_listen_addr(&get_env("PEER_PORT", ":9091"));

        Self {
            server_addr,
            peer_addr,
        }
    }
}
