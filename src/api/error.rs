// ==========================================
// 重金属污染指数计算系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换导入层错误为用户可读的错误消息
// ==========================================

use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("没有可导出的数据")]
    NoData,

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(String),

    #[error("已有导入正在进行，请稍后再试")]
    IngestionInProgress,

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::NoValidMeasurements | ImportError::MalformedRow { .. } => {
                ApiError::ValidationError(err.to_string())
            }
            ImportError::UnsupportedFormat(_) => ApiError::InvalidInput(err.to_string()),
            ImportError::IngestionInProgress => ApiError::IngestionInProgress,
            ImportError::FileReadError(_)
            | ImportError::FileTooLarge { .. }
            | ImportError::CsvParseError(_)
            | ImportError::JsonParseError(_) => ApiError::ImportError(err.to_string()),
            ImportError::UnknownMetal(_) | ImportError::InternalError(_) => {
                ApiError::InternalError(err.to_string())
            }
            ImportError::Other(e) => ApiError::Other(e),
        }
    }
}

/// API层Result类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_conversion() {
        let api_err: ApiError = ImportError::NoValidMeasurements.into();
        assert!(matches!(api_err, ApiError::ValidationError(_)));

        let api_err: ApiError = ImportError::UnsupportedFormat("xml".to_string()).into();
        assert!(matches!(api_err, ApiError::InvalidInput(ref msg) if msg.contains("xml")));

        let api_err: ApiError = ImportError::IngestionInProgress.into();
        assert!(matches!(api_err, ApiError::IngestionInProgress));

        let api_err: ApiError = ImportError::FileTooLarge { size: 10, limit: 5 }.into();
        assert!(matches!(api_err, ApiError::ImportError(_)));
    }

    #[test]
    fn test_error_messages_are_explicit() {
        let err = ApiError::NotFound("样品 42".to_string());
        assert_eq!(err.to_string(), "资源未找到: 样品 42");
        assert_eq!(ApiError::NoData.to_string(), "没有可导出的数据");
    }
}
