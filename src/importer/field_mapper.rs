// ==========================================
// 重金属污染指数计算系统 - 字段映射器实现
// ==========================================
// 职责: 原始字段 → 固定字段表映射 + 类型转换
// 红线: 只识别字段表内的字段,其余键静默忽略
// ==========================================

use crate::domain::record::{RawRecord, RawValue};
use crate::domain::sample::ConcentrationMap;
use crate::domain::types::MetalCode;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::sample_importer_trait::{
    DataCleaner as DataCleanerTrait, FieldMapper as FieldMapperTrait,
};

/// 字段类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Concentration(MetalCode), // 浓度: 默认 0
    Text,                     // 文本: 默认缺失
    OptionalFloat,            // 可选浮点: 默认缺失
}

/// 字段定义
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str], // 大小写不敏感,按顺序查找
    pub kind: FieldKind,
}

pub const FIELD_NAME: &str = "name";
pub const FIELD_LATITUDE: &str = "latitude";
pub const FIELD_LONGITUDE: &str = "longitude";

// ==========================================
// 标准字段表（有序）
// ==========================================
pub const FIELD_SCHEMA: [FieldSpec; 11] = [
    FieldSpec { name: "cd", aliases: &["cd"], kind: FieldKind::Concentration(MetalCode::Cd) },
    FieldSpec { name: "pb", aliases: &["pb"], kind: FieldKind::Concentration(MetalCode::Pb) },
    FieldSpec { name: "cr", aliases: &["cr"], kind: FieldKind::Concentration(MetalCode::Cr) },
    FieldSpec { name: "ni", aliases: &["ni"], kind: FieldKind::Concentration(MetalCode::Ni) },
    FieldSpec { name: "cu", aliases: &["cu"], kind: FieldKind::Concentration(MetalCode::Cu) },
    FieldSpec { name: "zn", aliases: &["zn"], kind: FieldKind::Concentration(MetalCode::Zn) },
    FieldSpec { name: "fe", aliases: &["fe"], kind: FieldKind::Concentration(MetalCode::Fe) },
    FieldSpec { name: "mn", aliases: &["mn"], kind: FieldKind::Concentration(MetalCode::Mn) },
    FieldSpec {
        name: FIELD_NAME,
        aliases: &["name", "samplename", "sample_name"],
        kind: FieldKind::Text,
    },
    FieldSpec { name: FIELD_LATITUDE, aliases: &["latitude"], kind: FieldKind::OptionalFloat },
    FieldSpec { name: FIELD_LONGITUDE, aliases: &["longitude"], kind: FieldKind::OptionalFloat },
];

/// 是否为字段表内的列名（含别名）
pub fn is_recognized_field(key: &str) -> bool {
    let key = key.trim();
    FIELD_SCHEMA
        .iter()
        .any(|spec| spec.aliases.iter().any(|a| a.eq_ignore_ascii_case(key)))
}

// ==========================================
// MappedRecord - 映射后的中间结构
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRecord {
    pub concentrations: ConcentrationMap, // 8 种金属均有值（缺省 0）
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }
}

impl FieldMapper {
    // 按别名顺序取首个非空值
    fn lookup<'a>(
        &self,
        record: &'a RawRecord,
        spec: &FieldSpec,
    ) -> Option<&'a RawValue> {
        spec.aliases.iter().find_map(|alias| record.get(alias))
    }
}

impl FieldMapperTrait for FieldMapper {
    fn map_record(&self, record: &RawRecord) -> MappedRecord {
        let mut mapped = MappedRecord {
            concentrations: ConcentrationMap::new(),
            name: None,
            latitude: None,
            longitude: None,
        };

        for spec in FIELD_SCHEMA.iter() {
            let value = self.lookup(record, spec);
            match spec.kind {
                FieldKind::Concentration(metal) => {
                    mapped
                        .concentrations
                        .set(metal, self.cleaner.clean_concentration(value));
                }
                FieldKind::Text => {
                    if spec.name == FIELD_NAME {
                        mapped.name = self.cleaner.clean_text(value);
                    }
                }
                FieldKind::OptionalFloat => {
                    let parsed = self.cleaner.clean_optional_float(value);
                    match spec.name {
                        FIELD_LATITUDE => mapped.latitude = parsed,
                        FIELD_LONGITUDE => mapped.longitude = parsed,
                        _ => {}
                    }
                }
            }
        }

        mapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_mapper_basic() {
        let record = RawRecord::new()
            .with("CD", "0.004")
            .with("Pb", RawValue::Number(0.02))
            .with("Hg", "9.9")
            .with("SampleName", " Lake 1 ")
            .with("Latitude", "12.97")
            .with("longitude", "77.59");

        let mapped = FieldMapper::default().map_record(&record);

        assert_eq!(mapped.concentrations.len(), 8);
        assert_eq!(mapped.concentrations.get(MetalCode::Cd), 0.004);
        assert_eq!(mapped.concentrations.get(MetalCode::Pb), 0.02);
        assert_eq!(mapped.concentrations.get(MetalCode::Mn), 0.0);
        assert_eq!(mapped.name, Some("Lake 1".to_string()));
        assert_eq!(mapped.latitude, Some(12.97));
        assert_eq!(mapped.longitude, Some(77.59));
    }

    #[test]
    fn test_name_alias_priority() {
        let record = RawRecord::new().with("samplename", "second").with("name", "first");
        let mapped = FieldMapper::default().map_record(&record);
        assert_eq!(mapped.name, Some("first".to_string()));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let record = RawRecord::new()
            .with("zn", "-4")
            .with("fe", "abc")
            .with("latitude", "north");
        let mapped = FieldMapper::default().map_record(&record);
        assert_eq!(mapped.concentrations.get(MetalCode::Zn), 0.0);
        assert_eq!(mapped.concentrations.get(MetalCode::Fe), 0.0);
        assert_eq!(mapped.latitude, None);
        assert!(!mapped.concentrations.has_positive());
    }

    #[test]
    fn test_is_recognized_field() {
        assert!(is_recognized_field("MN"));
        assert!(is_recognized_field(" sampleName "));
        assert!(!is_recognized_field("hg"));
        assert!(!is_recognized_field("depth"));
    }
}
