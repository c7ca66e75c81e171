// ==========================================
// 重金属污染指数计算系统 - 核心库
// ==========================================
// 计算: 按限值倒数加权的综合污染指数
// 流程: 原始记录 → 浓度表 → 计算结果 → 样品 → 汇总报告
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 指数计算与汇总
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 会话状态
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Category, MetalCode};

// 领域实体
pub use domain::{ComputationResult, ConcentrationMap, Coordinates, RawRecord, RawValue, Sample};
pub use domain::{StandardsError, StandardsTable};

// 引擎
pub use engine::{IndexEngine, ReportAggregator, SummaryStats};

// 导入
pub use importer::{BulkIngestor, ImportError, IngestReport, InputFormat};

// API
pub use api::{ApiError, SampleApi};

// 应用状态
pub use app::{AppState, SampleStore};

// ==========================================
// 系统常量
// ==========================================

/// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 系统名称
pub const APP_NAME: &str = "重金属污染指数计算系统";
