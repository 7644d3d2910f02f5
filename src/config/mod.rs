// ==========================================
// 物料库存系统 - 配置层
// ==========================================
// 职责: 从环境变量加载服务配置（缺省值兜底）
// 约定: 数值型变量非法时回退缺省值并告警
// ==========================================

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

// ==========================================
// 环境变量键
// ==========================================
pub mod env_keys {
    pub const DATA_FILE: &str = "MORE_DATA_FILE";
    pub const BIND_ADDR: &str = "MORE_BIND_ADDR";
    pub const PORT: &str = "MORE_PORT";
    pub const PUBLIC_DIR: &str = "MORE_PUBLIC_DIR";
    pub const MAX_UPLOAD_MB: &str = "MORE_MAX_UPLOAD_MB";
}

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_PUBLIC_DIR: &str = "./public";
pub const DEFAULT_MAX_UPLOAD_MB: usize = 10;

/// 服务配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// 物料记录文件
    pub data_file: PathBuf,
    pub bind_addr: IpAddr,
    pub port: u16,
    /// 前端静态文件目录
    pub public_dir: PathBuf,
    /// 上传大小上限（字节）
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_file: get_default_data_path(),
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// 从进程环境变量加载
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载（测试用注入）
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let max_upload_mb = parse_or(
            get(env_keys::MAX_UPLOAD_MB),
            env_keys::MAX_UPLOAD_MB,
            DEFAULT_MAX_UPLOAD_MB,
        );

        Self {
            data_file: get(env_keys::DATA_FILE)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            bind_addr: parse_or(get(env_keys::BIND_ADDR), env_keys::BIND_ADDR, defaults.bind_addr),
            port: parse_or(get(env_keys::PORT), env_keys::PORT, defaults.port),
            public_dir: get(env_keys::PUBLIC_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.public_dir),
            max_upload_bytes: max_upload_mb * 1024 * 1024,
        }
    }

    /// 监听地址
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> T {
    match raw {
        Some(value) => value.parse().unwrap_or_else(|_| {
            warn!(key = key, value = %value, "配置值非法，使用缺省值");
            default
        }),
        None => default,
    }
}

/// 获取默认数据文件路径
///
/// 优先使用用户数据目录（more-inventory/materiales.json），
/// 无法获取时回退到 ./data/materiales.json
pub fn get_default_data_path() -> PathBuf {
    match dirs::data_dir() {
        Some(data_dir) => data_dir.join("more-inventory").join("materiales.json"),
        None => PathBuf::from("./data/materiales.json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.port, 3001);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3001");
        assert_eq!(config.public_dir, PathBuf::from("./public"));
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert!(config.data_file.ends_with("materiales.json"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("MORE_DATA_FILE", "/tmp/inv.json"),
            ("MORE_BIND_ADDR", "127.0.0.1"),
            ("MORE_PORT", "8080"),
            ("MORE_MAX_UPLOAD_MB", "2"),
        ]);
        assert_eq!(config.data_file, PathBuf::from("/tmp/inv.json"));
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.max_upload_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = config_from(&[
            ("MORE_PORT", "abc"),
            ("MORE_MAX_UPLOAD_MB", "-1"),
            ("MORE_BIND_ADDR", "x"),
        ]);
        assert_eq!(config.port, 3001);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.bind_addr, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }
}
