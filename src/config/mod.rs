// ==========================================
// 重金属污染指数计算系统 - 配置层
// ==========================================
// 职责: 系统配置加载,缺省值兜底
// 存储: JSON 键值文件
// ==========================================

pub mod config_manager;
pub mod ingest_config_trait;

// 重导出核心配置管理器
pub use config_manager::{
    config_keys, default_config_path, defaults, ConfigError, ConfigManager, ConfigResult,
};
pub use ingest_config_trait::IngestConfigReader;
