// ==========================================
// 重金属污染指数计算系统 - 文本解析器实现
// ==========================================
// 支持: CSV (首行表头,逗号分隔,不支持引号转义) / JSON (对象数组)
// 输出: 原始行记录 + 无法解析的行
// ==========================================

use crate::domain::record::RawRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::is_recognized_field;
use crate::importer::sample_importer_trait::FileParser;
use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

// ==========================================
// InputFormat - 输入格式标签
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// 由文件扩展名推断格式
    pub fn from_path(path: &Path) -> ImportResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();
        ext.parse()
    }
}

impl FromStr for InputFormat {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(InputFormat::Csv),
            "json" => Ok(InputFormat::Json),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Csv => write!(f, "csv"),
            InputFormat::Json => write!(f, "json"),
        }
    }
}

// ==========================================
// ParsedRows - 解析结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub row_number: usize, // 数据行号（从 1 开始,不含表头）
    pub position: usize,   // 缺省命名序号（CSV 不计无内容行; JSON 按数组下标）
    pub record: RawRecord,
}

#[derive(Debug, Default)]
pub struct ParsedRows {
    pub records: Vec<ParsedRow>,
    pub malformed: Vec<ImportError>, // 均为 MalformedRow
}

impl ParsedRows {
    /// 输入数据行总数（可用 + 无法解析）
    pub fn total_rows(&self) -> usize {
        self.records.len() + self.malformed.len()
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, text: &str) -> ImportResult<ParsedRows> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .quoting(false) // 不支持引号/转义,逗号一律视为分隔符
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        // 读取表头（大小写不敏感）
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let mut parsed = ParsedRows::default();
        for (row_idx, result) in reader.records().enumerate() {
            let row_number = row_idx + 1;
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    parsed.malformed.push(ImportError::MalformedRow {
                        row: row_number,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            let mut raw = RawRecord::new();
            for (col_idx, value) in record.iter().enumerate() {
                // 超出表头的列忽略, 空单元格视为缺失
                if let Some(header) = headers.get(col_idx) {
                    if !value.is_empty() {
                        raw.insert(header.clone(), value);
                    }
                }
            }

            if !raw.has_content() {
                parsed.malformed.push(ImportError::MalformedRow {
                    row: row_number,
                    message: "该行没有任何可识别字段的值".to_string(),
                });
                continue;
            }

            parsed.records.push(ParsedRow {
                row_number,
                position: parsed.records.len() + 1,
                record: raw,
            });
        }

        Ok(parsed)
    }
}

// ==========================================
// JSON Parser 实现
// ==========================================
pub struct JsonParser;

impl FileParser for JsonParser {
    fn parse_to_raw_records(&self, text: &str) -> ImportResult<ParsedRows> {
        let value: Value = serde_json::from_str(text)?;
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(ImportError::JsonParseError(format!(
                    "顶层必须为记录数组, 实际为 {}",
                    json_type_name(&other)
                )))
            }
        };

        let mut parsed = ParsedRows::default();
        for (idx, item) in items.into_iter().enumerate() {
            let row_number = idx + 1;
            match item {
                Value::Object(map) => {
                    let record = RawRecord::from(map);
                    if record.has_content() {
                        parsed.records.push(ParsedRow {
                            row_number,
                            position: row_number,
                            record,
                        });
                    } else {
                        parsed.malformed.push(ImportError::MalformedRow {
                            row: row_number,
                            message: "记录为空".to_string(),
                        });
                    }
                }
                other => parsed.malformed.push(ImportError::MalformedRow {
                    row: row_number,
                    message: format!("期望对象, 实际为 {}", json_type_name(&other)),
                }),
            }
        }

        Ok(parsed)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ==========================================
// 通用解析器（根据格式标签选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse(&self, text: &str, format: InputFormat) -> ImportResult<ParsedRows> {
        match format {
            InputFormat::Csv => CsvParser.parse_to_raw_records(text),
            InputFormat::Json => JsonParser.parse_to_raw_records(text),
        }
    }

    /// 仅统计可识别的列名（用于日志提示）
    pub fn recognized_headers(text: &str) -> Vec<String> {
        text.lines()
            .next()
            .map(|line| {
                line.split(',')
                    .map(|h| h.trim().to_lowercase())
                    .filter(|h| is_recognized_field(h))
                    .collect()
            })
            .unwrap_or_default()
    }
}
