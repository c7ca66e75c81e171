// ==========================================
// 重金属污染指数计算系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 传播: 单行错误只影响该行,不中断批次;
//       仅输入获取失败 / 整体不可解析时中断本次导入
// ==========================================

use crate::domain::standards::StandardsError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 输入获取错误（中断本次导入）=====
    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("文件过大: {size} 字节（上限 {limit} 字节）")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("文件格式不支持: {0}（仅支持 csv/json）")]
    UnsupportedFormat(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("JSON 解析失败: {0}")]
    JsonParseError(String),

    // ===== 单行错误（跳过该行）=====
    #[error("无有效测量值: 至少需要一个大于 0 的金属浓度")]
    NoValidMeasurements,

    #[error("数据行无法解析 (行 {row}): {message}")]
    MalformedRow { row: usize, message: String },

    // ===== 并发控制 =====
    #[error("已有导入正在进行，请稍后再试")]
    IngestionInProgress,

    // ===== 程序错误 =====
    #[error(transparent)]
    UnknownMetal(#[from] StandardsError),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::JsonParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_metal_conversion() {
        let err: ImportError = StandardsError::UnknownMetal("hg".to_string()).into();
        assert!(matches!(err, ImportError::UnknownMetal(_)));
        assert_eq!(err.to_string(), "未知金属代码: hg");
    }
}
