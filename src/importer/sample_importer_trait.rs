// ==========================================
// 重金属污染指数计算系统 - 样品导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 输入获取 → 解析 → 字段映射/清洗 → 校验 → 计算
// ==========================================

use crate::domain::record::{RawRecord, RawValue};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::MappedRecord;
use crate::importer::file_parser::{InputFormat, ParsedRows};
use async_trait::async_trait;

// ==========================================
// SampleSource Trait
// ==========================================
// 用途: 输入获取（唯一的异步挂起点）
// 实现者: FileSource, 以及调用方自定义的上传来源
#[async_trait]
pub trait SampleSource: Send + Sync {
    /// 读取完整输入文本
    ///
    /// # 返回
    /// - Ok(String): 输入文本
    /// - Err: 读取失败（中断本次导入）
    async fn read_text(&self) -> ImportResult<String>;

    /// 声明的输入格式
    fn format(&self) -> ImportResult<InputFormat>;

    /// 来源描述（用于日志）
    fn describe(&self) -> String;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文本解析接口
// 实现者: CsvParser, JsonParser
pub trait FileParser: Send + Sync {
    /// 解析文本为原始行记录
    ///
    /// # 返回
    /// - Ok(ParsedRows): 可用行 + 无法解析的行
    /// - Err: 输入整体不可解析
    fn parse_to_raw_records(&self, text: &str) -> ImportResult<ParsedRows>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 原始记录 → 固定字段结构
// 实现者: FieldMapperImpl
pub trait FieldMapper: Send + Sync {
    /// 按字段表映射并完成类型转换（不做接受/拒绝判定）
    fn map_record(&self, record: &RawRecord) -> MappedRecord;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 单字段清洗与类型转换
// 实现者: DataCleanerImpl
pub trait DataCleaner: Send + Sync {
    /// 标准化 NULL 值（缺失 / 空白 → None）
    fn normalize_null(&self, value: Option<&RawValue>) -> Option<String>;

    /// 浓度: 缺失 / 不可解析 / 非有限 / 负值 → 0
    fn clean_concentration(&self, value: Option<&RawValue>) -> f64;

    /// 可选浮点: 缺失 / 不可解析 / 非有限 → None
    fn clean_optional_float(&self, value: Option<&RawValue>) -> Option<f64>;

    /// 文本: TRIM, 空串 → None
    fn clean_text(&self, value: Option<&RawValue>) -> Option<String>;
}
