// ==========================================
// 重金属污染指数计算系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、标准限值表
// 红线: 不含计算逻辑,不含导入逻辑
// ==========================================

pub mod record;
pub mod sample;
pub mod standards;
pub mod types;

// 重导出核心类型
pub use record::{RawRecord, RawValue};
pub use sample::{ComputationResult, ConcentrationMap, Coordinates, Sample, MAX_CONCENTRATION};
pub use standards::{MetalInfo, MetalStandard, StandardsError, StandardsTable};
pub use types::{Category, MetalCode};
