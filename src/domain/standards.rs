// ==========================================
// 重金属污染指数计算系统 - 标准限值表
// ==========================================
// 依据: WHO/EPA 饮用水重金属限值 (mg/L)
// 职责: 金属限值 + 单位权重 (1/限值) + 金属说明信息
// 红线: 进程启动后只计算一次,此后只读
// ==========================================

use crate::domain::types::MetalCode;
use once_cell::sync::Lazy;
use std::str::FromStr;
use thiserror::Error;

/// 标准限值表错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StandardsError {
    #[error("未知金属代码: {0}")]
    UnknownMetal(String),
}

// ==========================================
// MetalStandard - 单个金属的限值定义
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetalStandard {
    pub code: MetalCode,
    pub threshold_mg_per_l: f64, // 限值（mg/L，> 0）
    pub unit_weight: f64,        // 单位权重 = 1 / threshold_mg_per_l
}

impl MetalStandard {
    fn new(code: MetalCode, threshold_mg_per_l: f64) -> Self {
        Self {
            code,
            threshold_mg_per_l,
            unit_weight: 1.0 / threshold_mg_per_l,
        }
    }
}

// ==========================================
// MetalInfo - 金属说明（提示信息）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetalInfo {
    pub name: &'static str,
    pub symbol: &'static str,
    pub description: &'static str,
    pub sources: &'static str,
    pub health_effects: &'static str,
}

// 限值数据（按 MetalCode::ALL 顺序）
const THRESHOLDS: [(MetalCode, f64); 8] = [
    (MetalCode::Cd, 0.003),
    (MetalCode::Pb, 0.01),
    (MetalCode::Cr, 0.05),
    (MetalCode::Ni, 0.07),
    (MetalCode::Cu, 2.0),
    (MetalCode::Zn, 3.0),
    (MetalCode::Fe, 0.3),
    (MetalCode::Mn, 0.4),
];

static INFOS: [MetalInfo; 8] = [
    MetalInfo {
        name: "Cadmium",
        symbol: "Cd",
        description: "A toxic heavy metal that can cause kidney damage and bone disease.",
        sources: "Industrial processes, mining, batteries, pigments",
        health_effects: "Kidney damage, bone softening, lung damage",
    },
    MetalInfo {
        name: "Lead",
        symbol: "Pb",
        description: "A neurotoxic metal particularly harmful to children.",
        sources: "Old pipes, paint, gasoline, industrial processes",
        health_effects: "Neurological damage, developmental issues, anemia",
    },
    MetalInfo {
        name: "Chromium",
        symbol: "Cr",
        description: "Can exist in multiple forms, some more toxic than others.",
        sources: "Industrial processes, leather tanning, metal plating",
        health_effects: "Skin irritation, respiratory problems, cancer risk",
    },
    MetalInfo {
        name: "Nickel",
        symbol: "Ni",
        description: "Can cause allergic reactions and respiratory issues.",
        sources: "Industrial processes, mining, electroplating",
        health_effects: "Allergic reactions, respiratory problems, cancer risk",
    },
    MetalInfo {
        name: "Copper",
        symbol: "Cu",
        description: "Essential in small amounts but toxic in high concentrations.",
        sources: "Pipes, industrial processes, mining",
        health_effects: "Gastrointestinal issues, liver damage",
    },
    MetalInfo {
        name: "Zinc",
        symbol: "Zn",
        description: "Essential nutrient but can be harmful in excess.",
        sources: "Industrial processes, galvanized pipes, mining",
        health_effects: "Nausea, immune system suppression",
    },
    MetalInfo {
        name: "Iron",
        symbol: "Fe",
        description: "Essential nutrient but can affect taste and appearance of water.",
        sources: "Natural occurrence, pipes, industrial processes",
        health_effects: "Generally not harmful, but can cause staining",
    },
    MetalInfo {
        name: "Manganese",
        symbol: "Mn",
        description: "Essential in trace amounts but neurotoxic in excess.",
        sources: "Natural occurrence, industrial processes, mining",
        health_effects: "Neurological problems, movement disorders",
    },
];

// ==========================================
// StandardsTable - 标准限值表
// ==========================================
#[derive(Debug, Clone)]
pub struct StandardsTable {
    standards: [MetalStandard; 8],
}

static GLOBAL_TABLE: Lazy<StandardsTable> = Lazy::new(StandardsTable::build);

impl StandardsTable {
    fn build() -> Self {
        Self {
            standards: THRESHOLDS.map(|(code, threshold)| MetalStandard::new(code, threshold)),
        }
    }

    /// 进程级共享限值表（首次访问时计算权重）
    pub fn global() -> &'static StandardsTable {
        &GLOBAL_TABLE
    }

    /// 获取金属限值定义
    pub fn standard(&self, metal: MetalCode) -> &MetalStandard {
        // standards 与 MetalCode::ALL 同序,判别值即下标
        &self.standards[metal as usize]
    }

    /// 限值（mg/L）
    pub fn threshold(&self, metal: MetalCode) -> f64 {
        self.standard(metal).threshold_mg_per_l
    }

    /// 单位权重（1 / 限值）
    pub fn weight(&self, metal: MetalCode) -> f64 {
        self.standard(metal).unit_weight
    }

    /// 按字符串代码查询限值
    pub fn threshold_of(&self, code: &str) -> Result<f64, StandardsError> {
        Ok(self.threshold(MetalCode::from_str(code)?))
    }

    /// 按字符串代码查询权重
    pub fn weight_of(&self, code: &str) -> Result<f64, StandardsError> {
        Ok(self.weight(MetalCode::from_str(code)?))
    }

    /// 金属说明信息
    pub fn info(&self, metal: MetalCode) -> &'static MetalInfo {
        &INFOS[metal as usize]
    }

    /// 按固定顺序遍历全部限值
    pub fn iter(&self) -> impl Iterator<Item = &MetalStandard> {
        self.standards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_match_table() {
        let table = StandardsTable::global();
        assert_eq!(table.threshold(MetalCode::Cd), 0.003);
        assert_eq!(table.threshold(MetalCode::Pb), 0.01);
        assert_eq!(table.threshold(MetalCode::Cr), 0.05);
        assert_eq!(table.threshold(MetalCode::Ni), 0.07);
        assert_eq!(table.threshold(MetalCode::Cu), 2.0);
        assert_eq!(table.threshold(MetalCode::Zn), 3.0);
        assert_eq!(table.threshold(MetalCode::Fe), 0.3);
        assert_eq!(table.threshold(MetalCode::Mn), 0.4);
    }

    #[test]
    fn test_weight_is_inverse_threshold() {
        let table = StandardsTable::global();
        for standard in table.iter() {
            assert_eq!(standard.unit_weight, 1.0 / standard.threshold_mg_per_l);
            assert_eq!(table.weight(standard.code), standard.unit_weight);
        }
    }

    #[test]
    fn test_table_order_and_info_alignment() {
        let table = StandardsTable::global();
        for (standard, metal) in table.iter().zip(MetalCode::ALL) {
            assert_eq!(standard.code, metal);
            assert_eq!(table.info(metal).symbol, metal.symbol());
        }
    }

    #[test]
    fn test_lookup_by_code() {
        let table = StandardsTable::global();
        assert_eq!(table.threshold_of("ZN").unwrap(), 3.0);
        assert_eq!(
            table.weight_of("hg"),
            Err(StandardsError::UnknownMetal("hg".to_string()))
        );
    }
}
