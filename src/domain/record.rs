// ==========================================
// 重金属污染指数计算系统 - 原始记录
// ==========================================
// 职责: 手工录入 / 批量导入的未校验字段集合
// 说明: 键名保持原样,查询时大小写不敏感
// ==========================================

use serde_json::Value;

/// 原始字段值
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Absent,
}

impl RawValue {
    /// 转为去空白文本（空串视为缺失）
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            RawValue::Number(n) => Some(n.to_string()),
            RawValue::Absent => None,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawValue::Absent,
            Value::Number(n) => n.as_f64().map(RawValue::Number).unwrap_or(RawValue::Absent),
            Value::String(s) => RawValue::Text(s),
            // bool / array / object 保留文本形态, 由清洗阶段判定为不可解析
            other => RawValue::Text(other.to_string()),
        }
    }
}

// ==========================================
// RawRecord - 原始记录
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: Vec<(String, RawValue)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加字段（同名字段保留先写入者的查询优先级）
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.fields.push((key.into(), value.into()));
    }

    /// 链式构造
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// 大小写不敏感查询, 返回首个非缺失值
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.fields
            .iter()
            .filter(|(k, _)| k.trim().eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
            .find(|v| v.as_text().is_some())
    }

    /// 是否存在任一非空字段
    pub fn has_content(&self) -> bool {
        self.fields.iter().any(|(_, v)| v.as_text().is_some())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = RawRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl From<serde_json::Map<String, Value>> for RawRecord {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_is_case_insensitive() {
        let record = RawRecord::new().with("Cd", "0.01").with("SampleName", "Well 7");
        assert_eq!(record.get("cd"), Some(&RawValue::Text("0.01".to_string())));
        assert_eq!(record.get("samplename").and_then(|v| v.as_text()), Some("Well 7".to_string()));
        assert_eq!(record.get("pb"), None);
    }

    #[test]
    fn test_get_skips_blank_duplicates() {
        let record = RawRecord::new().with("cd", "  ").with("CD", "0.2");
        assert_eq!(record.get("cd").and_then(|v| v.as_text()), Some("0.2".to_string()));
    }

    #[test]
    fn test_from_json_map() {
        let value = json!({"cd": 0.004, "name": "River", "latitude": null, "flag": true});
        let record = match value {
            Value::Object(map) => RawRecord::from(map),
            _ => unreachable!(),
        };
        assert_eq!(record.get("cd"), Some(&RawValue::Number(0.004)));
        assert_eq!(record.get("latitude"), None);
        assert_eq!(record.get("flag"), Some(&RawValue::Text("true".to_string())));
        assert!(record.has_content());
    }

    #[test]
    fn test_empty_record_has_no_content() {
        let record = RawRecord::new().with("cd", "").with("pb", RawValue::Absent);
        assert!(!record.has_content());
        assert_eq!(record.len(), 2);
    }
}
