// ==========================================
// 重金属污染指数计算系统 - 记录校验器
// ==========================================
// 职责: 原始记录 → 浓度表 + 辅助字段（名称 / 坐标）
// 规则: 至少一个金属浓度严格大于 0 才接受
// 规则: 坐标无效只置空,不影响化学数据的接受
// ==========================================

use crate::domain::record::RawRecord;
use crate::domain::sample::{ConcentrationMap, Coordinates};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper as FieldMapperImpl;
use crate::importer::sample_importer_trait::FieldMapper;

/// 校验通过的记录
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord {
    pub concentrations: ConcentrationMap,
    pub name: Option<String>,
    pub coordinates: Option<Coordinates>,
}

pub struct RecordValidator {
    field_mapper: Box<dyn FieldMapper>,
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self::new(Box::new(FieldMapperImpl::default()))
    }
}

impl RecordValidator {
    pub fn new(field_mapper: Box<dyn FieldMapper>) -> Self {
        Self { field_mapper }
    }

    /// 校验单条原始记录
    ///
    /// # 返回
    /// - Ok(ValidatedRecord): 8 种金属浓度（缺省 0）+ 可选名称/坐标
    /// - Err(NoValidMeasurements): 所有金属浓度均 ≤ 0
    pub fn validate(&self, record: &RawRecord) -> ImportResult<ValidatedRecord> {
        let mapped = self.field_mapper.map_record(record);

        if !mapped.concentrations.has_positive() {
            return Err(ImportError::NoValidMeasurements);
        }

        Ok(ValidatedRecord {
            concentrations: mapped.concentrations,
            name: mapped.name,
            coordinates: Coordinates::from_parts(mapped.latitude, mapped.longitude),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::RawValue;
    use crate::domain::types::MetalCode;

    #[test]
    fn test_accepts_single_positive_metal() {
        let record = RawRecord::new().with("pb", "0.015").with("cd", "0");
        let validated = RecordValidator::default().validate(&record).unwrap();

        assert_eq!(validated.concentrations.get(MetalCode::Pb), 0.015);
        assert_eq!(validated.concentrations.len(), 8);
        assert_eq!(validated.name, None);
        assert_eq!(validated.coordinates, None);
    }

    #[test]
    fn test_rejects_all_zero_or_negative() {
        let validator = RecordValidator::default();
        let zeros = RawRecord::new().with("cd", "0").with("pb", "-2").with("zn", "x");
        assert!(matches!(
            validator.validate(&zeros),
            Err(ImportError::NoValidMeasurements)
        ));

        let nothing = RawRecord::new().with("name", "Only a name");
        assert!(matches!(
            validator.validate(&nothing),
            Err(ImportError::NoValidMeasurements)
        ));
    }

    #[test]
    fn test_negative_values_are_zeroed_not_propagated() {
        let record = RawRecord::new().with("cu", "-1.0").with("fe", "0.3");
        let validated = RecordValidator::default().validate(&record).unwrap();
        assert_eq!(validated.concentrations.get(MetalCode::Cu), 0.0);
        assert_eq!(validated.concentrations.get(MetalCode::Fe), 0.3);
    }

    #[test]
    fn test_invalid_coordinates_do_not_block_acceptance() {
        let record = RawRecord::new()
            .with("mn", RawValue::Number(0.2))
            .with("latitude", "123.0")
            .with("longitude", "45.0");
        let validated = RecordValidator::default().validate(&record).unwrap();
        assert_eq!(validated.coordinates, None);

        let half = RawRecord::new().with("mn", "0.2").with("latitude", "10.5");
        let validated = RecordValidator::default().validate(&half).unwrap();
        assert_eq!(validated.coordinates, None);
    }

    #[test]
    fn test_valid_coordinates_extracted() {
        let record = RawRecord::new()
            .with("NI", "0.08")
            .with("Latitude", "-33.8688")
            .with("Longitude", "151.2093")
            .with("name", "Harbour");
        let validated = RecordValidator::default().validate(&record).unwrap();
        let coords = validated.coordinates.unwrap();
        assert_eq!(coords.latitude, -33.8688);
        assert_eq!(coords.longitude, 151.2093);
        assert_eq!(validated.name, Some("Harbour".to_string()));
    }
}
