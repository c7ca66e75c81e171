// ==========================================
// 重金属污染指数计算系统 - API层
// ==========================================
// 职责: 对调用方（展示层 / CLI）暴露的业务接口
// 红线: 只返回只读快照,不输出展示标记
// ==========================================

pub mod error;
pub mod sample_api;

pub use error::{ApiError, ApiResult};
pub use sample_api::{ExportedReport, ImportApiResponse, MetalBreakdown, SampleApi, SampleDetail};
