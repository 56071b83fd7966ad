use std::{env, net::SocketAddr, path::Path, path::PathBuf};

use anyhow::{Context, Result};

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

pub struct ServerConfig {
    /// Directory holding the `orders.jsonl` and `customers.jsonl` exports
    pub data_dir: PathBuf,
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn load(manifest_dir: &Path) -> Result<Self> {
        #[cfg(debug_assertions)]
        {
            let env_file = manifest_dir.join(".env");
            if env_file.exists() {
                dotenvy::from_path(&env_file)
                    .with_context(|| format!("Can't read {}", env_file.display()))?;
            }
        }
        #[cfg(not(debug_assertions))]
        let _ = manifest_dir;

        let data_dir = env::var("ANALYTICS_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into());
        let bind_addr = env::var("ANALYTICS_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            bind_addr: bind_addr
                .parse()
                .with_context(|| format!("ANALYTICS_BIND_ADDR is not a socket address: {bind_addr}"))?,
        })
    }
}

/// Load server config using the calling crate's manifest directory.
#[macro_export]
macro_rules! load_server_config {
    () => {
        $crate::config::ServerConfig::load(std::path::Path::new(env!("CARGO_MANIFEST_DIR")))
    };
}
