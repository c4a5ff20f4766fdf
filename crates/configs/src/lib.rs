use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_products_path")]
    pub products_path: String,
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: String,
    #[serde(default = "default_create_if_missing")]
    pub create_if_missing: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            products_path: default_products_path(),
            frontend_dir: default_frontend_dir(),
            create_if_missing: default_create_if_missing(),
        }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 3000 }
fn default_products_path() -> String { "database/products.json".into() }
fn default_frontend_dir() -> String { "frontend".into() }
fn default_create_if_missing() -> bool { true }

const DEFAULT_CONFIG_PATH: &str = "config.toml";

pub fn load_default() -> Result<AppConfig> {
    load_resolved(std::env::var("CONFIG_PATH").ok().as_deref())
}

/// 配置来源解析：
/// - 显式给出的路径必须存在且可解析
/// - 默认的 `config.toml` 不存在时回退到环境变量
/// - 文件存在但内容有误时直接报错，不做回退
pub fn load_resolved(explicit_path: Option<&str>) -> Result<AppConfig> {
    if let Some(path) = explicit_path {
        return load_from_file(path);
    }
    match std::fs::read_to_string(DEFAULT_CONFIG_PATH) {
        Ok(content) => load_from_str(&content).map_err(|e| anyhow!("{}: {}", DEFAULT_CONFIG_PATH, e)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(from_env()),
        Err(e) => Err(anyhow!("cannot read {}: {}", DEFAULT_CONFIG_PATH, e)),
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| anyhow!("cannot read {}: {}", path, e))?;
    load_from_str(&content).map_err(|e| anyhow!("{}: {}", path, e))
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

/// Build a config from environment variables only, used when no config file exists.
pub fn from_env() -> AppConfig {
    let mut cfg = AppConfig::default();
    if let Ok(host) = std::env::var("SERVER_HOST") {
        cfg.server.host = host;
    }
    if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        cfg.server.port = port;
    }
    cfg.server.worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .or(cfg.server.worker_threads);
    if let Ok(path) = std::env::var("PRODUCTS_FILE") {
        cfg.storage.products_path = path;
    }
    if let Ok(dir) = std::env::var("FRONTEND_DIR") {
        cfg.storage.frontend_dir = dir;
    }
    cfg
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to environment
    /// variables only when the default file is absent, then normalize.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<std::net::SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.products_path.trim().is_empty() {
            return Err(anyhow!("storage.products_path must not be empty"));
        }
        if self.products_path.ends_with('/') {
            return Err(anyhow!("storage.products_path must name a file, got directory {}", self.products_path));
        }
        Ok(())
    }

    /// Directory holding the products file, if the path has one.
    pub fn data_dir(&self) -> String {
        std::path::Path::new(&self.products_path)
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
