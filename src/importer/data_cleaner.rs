// ==========================================
// 重金属污染指数计算系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 数值解析与默认值
// ==========================================

use crate::domain::record::RawValue;
use crate::importer::sample_importer_trait::DataCleaner as DataCleanerTrait;

pub struct DataCleaner;

impl DataCleaner {
    fn parse_f64(&self, value: Option<&RawValue>) -> Option<f64> {
        let parsed = match value? {
            RawValue::Number(n) => Some(*n),
            other => self
                .normalize_null(Some(other))
                .and_then(|s| s.parse::<f64>().ok()),
        };
        parsed.filter(|n| n.is_finite())
    }
}

impl DataCleanerTrait for DataCleaner {
    fn normalize_null(&self, value: Option<&RawValue>) -> Option<String> {
        value.and_then(RawValue::as_text)
    }

    fn clean_concentration(&self, value: Option<&RawValue>) -> f64 {
        match self.parse_f64(value) {
            Some(v) if v > 0.0 => v,
            _ => 0.0,
        }
    }

    fn clean_optional_float(&self, value: Option<&RawValue>) -> Option<f64> {
        self.parse_f64(value)
    }

    fn clean_text(&self, value: Option<&RawValue>) -> Option<String> {
        self.normalize_null(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawValue {
        RawValue::Text(s.to_string())
    }

    #[test]
    fn test_normalize_null() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_null(Some(&text("  "))), None);
        assert_eq!(cleaner.normalize_null(Some(&text(""))), None);
        assert_eq!(
            cleaner.normalize_null(Some(&text("  value  "))),
            Some("value".to_string())
        );
        assert_eq!(cleaner.normalize_null(Some(&RawValue::Absent)), None);
        assert_eq!(cleaner.normalize_null(None), None);
    }

    #[test]
    fn test_clean_concentration_defaults_to_zero() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.clean_concentration(Some(&text(" 0.012 "))), 0.012);
        assert_eq!(cleaner.clean_concentration(Some(&RawValue::Number(1.5))), 1.5);
        assert_eq!(cleaner.clean_concentration(Some(&text("-0.3"))), 0.0);
        assert_eq!(cleaner.clean_concentration(Some(&text("n/a"))), 0.0);
        assert_eq!(cleaner.clean_concentration(Some(&text("NaN"))), 0.0);
        assert_eq!(cleaner.clean_concentration(Some(&text("inf"))), 0.0);
        assert_eq!(cleaner.clean_concentration(Some(&RawValue::Absent)), 0.0);
        assert_eq!(cleaner.clean_concentration(None), 0.0);
    }

    #[test]
    fn test_clean_optional_float() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.clean_optional_float(Some(&text("-33.86"))), Some(-33.86));
        assert_eq!(cleaner.clean_optional_float(Some(&text("north"))), None);
        assert_eq!(cleaner.clean_optional_float(Some(&RawValue::Number(f64::NAN))), None);
        assert_eq!(cleaner.clean_optional_float(None), None);
    }

    #[test]
    fn test_clean_text() {
        let cleaner = DataCleaner;
        assert_eq!(
            cleaner.clean_text(Some(&text("  Well 3 "))),
            Some("Well 3".to_string())
        );
        assert_eq!(cleaner.clean_text(Some(&RawValue::Number(7.0))), Some("7".to_string()));
    }
}
