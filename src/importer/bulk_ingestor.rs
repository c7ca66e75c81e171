// ==========================================
// 重金属污染指数计算系统 - 批量导入器
// ==========================================
// 流程: 解析 → 映射/清洗 → 校验 → 指数计算 → 生成样品
// 红线: 单行失败只跳过该行,不中断批次
// 红线: 不持有样品集合,替换由调用方完成
// ==========================================

use crate::domain::record::RawRecord;
use crate::domain::sample::Sample;
use crate::engine::IndexEngine;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{InputFormat, ParsedRow, UniversalFileParser};
use crate::importer::record_validator::RecordValidator;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_NAME_PREFIX: &str = "Sample";

// ==========================================
// IngestReport - 导入结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    pub samples: Vec<Sample>, // 按输入顺序
    pub total_rows: usize,    // 输入数据行总数
    pub accepted: usize,
    pub rejected: usize,  // 校验失败（无有效测量值）
    pub malformed: usize, // 无法解析的行
}

impl IngestReport {
    /// 被跳过的行数
    pub fn skipped(&self) -> usize {
        self.rejected + self.malformed
    }
}

// ==========================================
// BulkIngestor - 批量导入器
// ==========================================
pub struct BulkIngestor {
    parser: UniversalFileParser,
    validator: RecordValidator,
    engine: IndexEngine,
    name_prefix: String,
}

impl Default for BulkIngestor {
    fn default() -> Self {
        Self::new(DEFAULT_NAME_PREFIX)
    }
}

impl BulkIngestor {
    /// # 参数
    /// - name_prefix: 缺省样品名前缀（"<前缀> <位置>"）
    pub fn new(name_prefix: impl Into<String>) -> Self {
        Self {
            parser: UniversalFileParser,
            validator: RecordValidator::default(),
            engine: IndexEngine::new(),
            name_prefix: name_prefix.into(),
        }
    }

    /// 缺省样品名
    pub fn default_name(&self, position: usize) -> String {
        format!("{} {}", self.name_prefix, position)
    }

    /// 单条记录 → 样品
    ///
    /// # 返回
    /// - Ok(Sample): 校验通过并完成计算
    /// - Err(NoValidMeasurements): 无有效测量值
    pub fn build_sample(&self, record: &RawRecord, position: usize) -> ImportResult<Sample> {
        let validated = self.validator.validate(record)?;
        let result = self.engine.compute_index(&validated.concentrations);
        let name = validated
            .name
            .unwrap_or_else(|| self.default_name(position));

        Ok(Sample::new(
            name,
            validated.coordinates,
            validated.concentrations,
            result,
        ))
    }

    /// 从文本导入
    ///
    /// # 返回
    /// - Ok(IngestReport): 接受的样品 + 行计数
    /// - Err: 格式不支持 / 文本整体不可解析
    #[instrument(skip(self, text), fields(format = %format, bytes = text.len()))]
    pub fn ingest_text(&self, text: &str, format: InputFormat) -> ImportResult<IngestReport> {
        info!("开始批量导入");

        // === 步骤 1: 解析 ===
        debug!("步骤 1: 解析文本");
        if format == InputFormat::Csv {
            debug!(headers = ?UniversalFileParser::recognized_headers(text), "可识别的列");
        }
        let parsed = self.parser.parse(text, format)?;
        for err in &parsed.malformed {
            warn!(error = %err, "跳过无法解析的行");
        }
        let malformed = parsed.malformed.len();
        let total_rows = parsed.total_rows();
        debug!(total_rows, malformed, "解析完成");

        // === 步骤 2: 校验 + 计算 ===
        let report = self.build_report(parsed.records, total_rows, malformed);
        info!(
            total_rows = report.total_rows,
            accepted = report.accepted,
            rejected = report.rejected,
            malformed = report.malformed,
            "批量导入完成"
        );
        Ok(report)
    }

    /// 从已结构化的记录导入（位置按输入顺序从 1 开始）
    #[instrument(skip(self, records), fields(rows = records.len()))]
    pub fn ingest_records(&self, records: Vec<RawRecord>) -> IngestReport {
        info!("开始导入结构化记录");
        let total_rows = records.len();
        let mut rows = Vec::with_capacity(total_rows);
        let mut malformed = 0;

        for (idx, record) in records.into_iter().enumerate() {
            let row_number = idx + 1;
            if record.has_content() {
                rows.push(ParsedRow {
                    row_number,
                    position: row_number,
                    record,
                });
            } else {
                let err = ImportError::MalformedRow {
                    row: row_number,
                    message: "记录为空".to_string(),
                };
                warn!(error = %err, "跳过无法解析的行");
                malformed += 1;
            }
        }

        let report = self.build_report(rows, total_rows, malformed);
        info!(
            total_rows = report.total_rows,
            accepted = report.accepted,
            rejected = report.rejected,
            malformed = report.malformed,
            "结构化记录导入完成"
        );
        report
    }

    fn build_report(&self, rows: Vec<ParsedRow>, total_rows: usize, malformed: usize) -> IngestReport {
        let mut samples = Vec::with_capacity(rows.len());
        let mut rejected = 0;

        for row in rows {
            match self.build_sample(&row.record, row.position) {
                Ok(sample) => {
                    debug!(row = row.row_number, index = sample.index(), "行已接受");
                    samples.push(sample);
                }
                Err(e) => {
                    warn!(row = row.row_number, error = %e, "跳过未通过校验的行");
                    rejected += 1;
                }
            }
        }

        IngestReport {
            accepted: samples.len(),
            samples,
            total_rows,
            rejected,
            malformed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Category, MetalCode};

    #[test]
    fn test_ingest_csv_skips_rows_without_measurements() {
        let text = "name,cd,pb\nA,0.003,\n,0,0\nC,,0.03\n";
        let report = BulkIngestor::default()
            .ingest_text(text, InputFormat::Csv)
            .unwrap();

        assert_eq!(report.total_rows, 3);
        assert_eq!(report.accepted, 2);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.samples[0].name, "A");
        assert_eq!(report.samples[0].index(), 100.0);
        assert_eq!(report.samples[1].name, "C");
        assert_eq!(report.samples[1].category(), Category::Hazardous);
    }

    #[test]
    fn test_default_name_uses_row_position() {
        let text = "cd\n0\n0.001\n0.002\n";
        let report = BulkIngestor::default()
            .ingest_text(text, InputFormat::Csv)
            .unwrap();

        let names: Vec<&str> = report.samples.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Sample 2", "Sample 3"]);
    }

    #[test]
    fn test_custom_name_prefix() {
        let report = BulkIngestor::new("Well")
            .ingest_text("zn\n1.5\n", InputFormat::Csv)
            .unwrap();
        assert_eq!(report.samples[0].name, "Well 1");
    }

    #[test]
    fn test_ingest_json_records() {
        let text = r#"[
            {"sample_name": "J1", "fe": 0.3, "latitude": 10, "longitude": 20},
            "oops",
            {"mn": "0"}
        ]"#;
        let report = BulkIngestor::default()
            .ingest_text(text, InputFormat::Json)
            .unwrap();

        assert_eq!(report.total_rows, 3);
        assert_eq!(report.accepted, 1);
        assert_eq!(report.malformed, 1);
        assert_eq!(report.rejected, 1);
        let sample = &report.samples[0];
        assert_eq!(sample.name, "J1");
        assert_eq!(sample.concentrations.get(MetalCode::Fe), 0.3);
        assert!(sample.coordinates.is_some());
    }

    #[test]
    fn test_ingest_invalid_json_aborts() {
        let result = BulkIngestor::default().ingest_text("[{", InputFormat::Json);
        assert!(matches!(result, Err(ImportError::JsonParseError(_))));
    }

    #[test]
    fn test_ingest_records_counts_empty_as_malformed() {
        let records = vec![
            RawRecord::new().with("cu", "2.0"),
            RawRecord::new().with("name", "  "),
            RawRecord::new().with("name", "no metals"),
        ];
        let report = BulkIngestor::default().ingest_records(records);

        assert_eq!(report.total_rows, 3);
        assert_eq!(report.accepted, 1);
        assert_eq!(report.malformed, 1);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.samples[0].name, "Sample 1");
    }

    #[test]
    fn test_empty_text_yields_empty_report() {
        let report = BulkIngestor::default()
            .ingest_text("", InputFormat::Csv)
            .unwrap();
        assert_eq!(report.total_rows, 0);
        assert!(report.samples.is_empty());
    }
}
