// ==========================================
// 重金属污染指数计算系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询（内置默认值兜底）
// 存储: 扁平 JSON 键值文件
// 路径: HMPI_CONFIG_PATH → 用户配置目录 → ./hmpi_config.json
// ==========================================

use crate::config::ingest_config_trait::IngestConfigReader;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const CONFIG_PATH_ENV: &str = "HMPI_CONFIG_PATH";
const CONFIG_DIR_NAME: &str = "hmpi-calculator";
const CONFIG_FILE_NAME: &str = "config.json";
const FALLBACK_CONFIG_PATH: &str = "./hmpi_config.json";

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误: {path}: {message}")]
    ParseError { path: String, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 从默认路径加载（文件不存在时使用内置默认值）
    pub fn load() -> ConfigResult<Self> {
        Self::from_file(default_config_path())
    }

    /// 从指定文件加载
    ///
    /// # 返回
    /// - Ok(ConfigManager): 文件不存在时为空配置
    /// - Err: 文件存在但无法读取或解析
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let raw: HashMap<String, Value> =
            serde_json::from_str(&text).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let values = raw
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect::<HashMap<_, _>>();

        info!(path = %path.display(), keys = values.len(), "配置文件加载完成");
        Ok(Self {
            values,
            source: Some(path.to_path_buf()),
        })
    }

    /// 由键值表构造（测试 / 嵌入调用方）
    pub fn from_map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            source: None,
        }
    }

    /// 配置来源文件
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 读取配置值
    pub fn get_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// 读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> String {
        self.get_config_value(key)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    /// 生效配置快照（含默认值）
    pub fn get_config_snapshot(&self) -> BTreeMap<&'static str, String> {
        let mut snapshot = BTreeMap::new();
        snapshot.insert(config_keys::MAX_FILE_BYTES, self.max_file_bytes().to_string());
        snapshot.insert(config_keys::DEFAULT_NAME_PREFIX, self.default_name_prefix());
        snapshot.insert(
            config_keys::INCLUDE_RECOMMENDATIONS,
            self.include_recommendations().to_string(),
        );
        snapshot.insert(config_keys::LOG_FILTER, self.log_filter());
        snapshot
    }
}

// ==========================================
// IngestConfigReader Trait 实现
// ==========================================
impl IngestConfigReader for ConfigManager {
    fn max_file_bytes(&self) -> u64 {
        let value = self.get_config_or_default(
            config_keys::MAX_FILE_BYTES,
            &defaults::MAX_FILE_BYTES.to_string(),
        );
        match value.parse::<u64>() {
            Ok(v) if v > 0 => v,
            _ => {
                warn!(config_key = config_keys::MAX_FILE_BYTES, raw_value = %value, "配置格式错误，使用默认值");
                defaults::MAX_FILE_BYTES
            }
        }
    }

    fn default_name_prefix(&self) -> String {
        self.get_config_or_default(config_keys::DEFAULT_NAME_PREFIX, defaults::DEFAULT_NAME_PREFIX)
    }

    fn include_recommendations(&self) -> bool {
        let value = self.get_config_or_default(config_keys::INCLUDE_RECOMMENDATIONS, "true");
        match value.to_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            _ => {
                warn!(config_key = config_keys::INCLUDE_RECOMMENDATIONS, raw_value = %value, "配置格式错误，使用默认值");
                defaults::INCLUDE_RECOMMENDATIONS
            }
        }
    }

    fn log_filter(&self) -> String {
        self.get_config_or_default(config_keys::LOG_FILTER, defaults::LOG_FILTER)
    }
}

/// 默认配置文件路径
///
/// 优先级: 环境变量 HMPI_CONFIG_PATH → <用户配置目录>/hmpi-calculator/config.json → ./hmpi_config.json
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    let path = dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_CONFIG_PATH));
    debug!(path = %path.display(), "默认配置路径");
    path
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 导入
    pub const MAX_FILE_BYTES: &str = "ingest.max_file_bytes";
    pub const DEFAULT_NAME_PREFIX: &str = "ingest.default_name_prefix";

    // 报告
    pub const INCLUDE_RECOMMENDATIONS: &str = "report.include_recommendations";

    // 日志
    pub const LOG_FILTER: &str = "log.filter";
}

// ==========================================
// 内置默认值
// ==========================================
pub mod defaults {
    pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;
    pub const DEFAULT_NAME_PREFIX: &str = "Sample";
    pub const INCLUDE_RECOMMENDATIONS: bool = true;
    pub const LOG_FILTER: &str = "info";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_when_empty() {
        let config = ConfigManager::default();
        assert_eq!(config.max_file_bytes(), 10_485_760);
        assert_eq!(config.default_name_prefix(), "Sample");
        assert!(config.include_recommendations());
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn test_from_map_overrides() {
        let config = ConfigManager::from_map([
            (config_keys::MAX_FILE_BYTES, "2048"),
            (config_keys::DEFAULT_NAME_PREFIX, "Well"),
            (config_keys::INCLUDE_RECOMMENDATIONS, "false"),
        ]);
        assert_eq!(config.max_file_bytes(), 2048);
        assert_eq!(config.default_name_prefix(), "Well");
        assert!(!config.include_recommendations());
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ConfigManager::from_map([
            (config_keys::MAX_FILE_BYTES, "lots"),
            (config_keys::INCLUDE_RECOMMENDATIONS, "maybe"),
            (config_keys::DEFAULT_NAME_PREFIX, "   "),
        ]);
        assert_eq!(config.max_file_bytes(), defaults::MAX_FILE_BYTES);
        assert!(config.include_recommendations());
        assert_eq!(config.default_name_prefix(), "Sample");
    }

    #[test]
    fn test_from_file_accepts_typed_json_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"ingest.max_file_bytes": 4096, "report.include_recommendations": false, "log.filter": "debug", "unknown.key": 1}}"#
        )
        .unwrap();

        let config = ConfigManager::from_file(file.path()).unwrap();
        assert_eq!(config.max_file_bytes(), 4096);
        assert!(!config.include_recommendations());
        assert_eq!(config.log_filter(), "debug");
        assert_eq!(config.source(), Some(file.path()));
    }

    #[test]
    fn test_from_file_missing_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigManager::from_file(dir.path().join("none.json")).unwrap();
        assert_eq!(config.max_file_bytes(), defaults::MAX_FILE_BYTES);
        assert!(config.source().is_none());
    }

    #[test]
    fn test_from_file_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            ConfigManager::from_file(file.path()),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_snapshot_contains_effective_values() {
        let config = ConfigManager::from_map([(config_keys::LOG_FILTER, "warn")]);
        let snapshot = config.get_config_snapshot();
        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot[config_keys::LOG_FILTER], "warn");
        assert_eq!(snapshot[config_keys::MAX_FILE_BYTES], "10485760");
    }
}
