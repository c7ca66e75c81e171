// ==========================================
// 重金属污染指数计算系统 - 输入来源实现
// ==========================================
// 职责: 异步获取待导入文本
// 红线: 读取失败 / 超出大小上限 → 中断本次导入
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::InputFormat;
use crate::importer::sample_importer_trait::SampleSource;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

// ==========================================
// FileSource - 本地文件来源
// ==========================================
pub struct FileSource {
    path: PathBuf,
    max_bytes: u64,
}

impl FileSource {
    /// # 参数
    /// - path: 文件路径（扩展名决定格式）
    /// - max_bytes: 文件大小上限
    pub fn new(path: impl AsRef<Path>, max_bytes: u64) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_bytes,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SampleSource for FileSource {
    async fn read_text(&self) -> ImportResult<String> {
        let metadata = tokio::fs::metadata(&self.path).await.map_err(|e| {
            ImportError::FileReadError(format!("{}: {}", self.path.display(), e))
        })?;

        if metadata.len() > self.max_bytes {
            return Err(ImportError::FileTooLarge {
                size: metadata.len(),
                limit: self.max_bytes,
            });
        }

        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ImportError::FileReadError(format!("{}: {}", self.path.display(), e))
        })?;
        debug!(path = %self.path.display(), bytes = text.len(), "文件读取完成");
        Ok(text)
    }

    fn format(&self) -> ImportResult<InputFormat> {
        InputFormat::from_path(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// ==========================================
// MemorySource - 内存文本来源（上传内容）
// ==========================================
pub struct MemorySource {
    text: String,
    format: InputFormat,
}

impl MemorySource {
    pub fn new(text: impl Into<String>, format: InputFormat) -> Self {
        Self {
            text: text.into(),
            format,
        }
    }
}

#[async_trait]
impl SampleSource for MemorySource {
    async fn read_text(&self) -> ImportResult<String> {
        Ok(self.text.clone())
    }

    fn format(&self) -> ImportResult<InputFormat> {
        Ok(self.format)
    }

    fn describe(&self) -> String {
        format!("内存文本 ({}, {} 字节)", self.format, self.text.len())
    }
}
