// ==========================================
// 重金属污染指数计算系统 - 导入层
// ==========================================
// 职责: 外部数据导入,生成样品
// 支持: CSV, JSON, 手工录入记录
// ==========================================

// 模块声明
pub mod bulk_ingestor;
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod record_validator;
pub mod sample_importer_trait;
pub mod source;

// 重导出核心类型
pub use bulk_ingestor::{BulkIngestor, IngestReport, DEFAULT_NAME_PREFIX};
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use field_mapper::{FieldKind, FieldSpec, MappedRecord, FIELD_SCHEMA};
pub use file_parser::{CsvParser, InputFormat, JsonParser, ParsedRow, ParsedRows, UniversalFileParser};
pub use record_validator::{RecordValidator, ValidatedRecord};
pub use source::{FileSource, MemorySource};

// 重导出 Trait 接口
pub use sample_importer_trait::{DataCleaner, FieldMapper, FileParser, SampleSource};
