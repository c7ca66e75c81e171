// ==========================================
// 重金属污染指数计算系统 - 引擎层
// ==========================================
// 职责: 指数计算、汇总统计、报告生成
// 红线: 引擎均为纯函数,不持有样品集合,不做 I/O
// ==========================================

pub mod aggregate;
pub mod index;
pub mod report;

// 重导出核心引擎
pub use aggregate::{mean_concentrations, SummaryStats};
pub use index::{categorize, IndexEngine};
pub use report::{report_file_name, ReportAggregator, ReportOptions};
