// ==========================================
// 重金属污染指数计算系统 - 应用层
// ==========================================
// 职责: 会话状态,连接调用方与后端
// ==========================================

pub mod state;

// 重导出
pub use state::{AppState, SampleStore};
