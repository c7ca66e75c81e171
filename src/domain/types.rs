// ==========================================
// 重金属污染指数计算系统 - 领域类型定义
// ==========================================
// 职责: 金属代码 / 风险分类等基础枚举
// 红线: 金属集合固定为 8 种,迭代顺序全局唯一
// ==========================================

use crate::domain::standards::StandardsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 金属代码 (Metal Code)
// ==========================================
// 声明顺序即固定迭代顺序: cd, pb, cr, ni, cu, zn, fe, mn
// BTreeMap<MetalCode, _> 的遍历顺序依赖此处的 Ord 派生
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetalCode {
    Cd, // 镉
    Pb, // 铅
    Cr, // 铬
    Ni, // 镍
    Cu, // 铜
    Zn, // 锌
    Fe, // 铁
    Mn, // 锰
}

impl MetalCode {
    /// 固定迭代顺序
    pub const ALL: [MetalCode; 8] = [
        MetalCode::Cd,
        MetalCode::Pb,
        MetalCode::Cr,
        MetalCode::Ni,
        MetalCode::Cu,
        MetalCode::Zn,
        MetalCode::Fe,
        MetalCode::Mn,
    ];

    /// 小写代码（输入字段名 / 序列化键）
    pub fn code(&self) -> &'static str {
        match self {
            MetalCode::Cd => "cd",
            MetalCode::Pb => "pb",
            MetalCode::Cr => "cr",
            MetalCode::Ni => "ni",
            MetalCode::Cu => "cu",
            MetalCode::Zn => "zn",
            MetalCode::Fe => "fe",
            MetalCode::Mn => "mn",
        }
    }

    /// 化学符号
    pub fn symbol(&self) -> &'static str {
        match self {
            MetalCode::Cd => "Cd",
            MetalCode::Pb => "Pb",
            MetalCode::Cr => "Cr",
            MetalCode::Ni => "Ni",
            MetalCode::Cu => "Cu",
            MetalCode::Zn => "Zn",
            MetalCode::Fe => "Fe",
            MetalCode::Mn => "Mn",
        }
    }
}

impl fmt::Display for MetalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code().to_uppercase())
    }
}

impl FromStr for MetalCode {
    type Err = StandardsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        MetalCode::ALL
            .iter()
            .copied()
            .find(|m| m.code() == normalized)
            .ok_or(StandardsError::UnknownMetal(s.to_string()))
    }
}

// ==========================================
// 风险分类 (Category)
// ==========================================
// 顺序: Safe < Moderate < Hazardous
// 边界: (.., 100] → Safe, (100, 200] → Moderate, (200, ..) → Hazardous
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Safe,      // 安全
    Moderate,  // 中度风险
    Hazardous, // 危险
}

/// 安全上限（含）
pub const SAFE_UPPER_BOUND: f64 = 100.0;

/// 中度风险上限（含）
pub const MODERATE_UPPER_BOUND: f64 = 200.0;

impl Category {
    pub const ALL: [Category; 3] = [Category::Safe, Category::Moderate, Category::Hazardous];

    /// 由指数值判定分类（纯函数,仅依赖 index）
    pub fn from_index(index: f64) -> Self {
        if index <= SAFE_UPPER_BOUND {
            Category::Safe
        } else if index <= MODERATE_UPPER_BOUND {
            Category::Moderate
        } else {
            Category::Hazardous
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Safe => "safe",
            Category::Moderate => "moderate",
            Category::Hazardous => "hazardous",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "safe" => Ok(Category::Safe),
            "moderate" => Ok(Category::Moderate),
            "hazardous" => Ok(Category::Hazardous),
            other => Err(format!("未知分类: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metal_code_from_str_case_insensitive() {
        assert_eq!("CD".parse::<MetalCode>().unwrap(), MetalCode::Cd);
        assert_eq!(" pb ".parse::<MetalCode>().unwrap(), MetalCode::Pb);
        assert_eq!("Mn".parse::<MetalCode>().unwrap(), MetalCode::Mn);
    }

    #[test]
    fn test_metal_code_unknown() {
        let err = "hg".parse::<MetalCode>().unwrap_err();
        assert!(matches!(err, StandardsError::UnknownMetal(ref code) if code == "hg"));
    }

    #[test]
    fn test_metal_order_matches_declaration() {
        let mut sorted = MetalCode::ALL;
        sorted.sort();
        assert_eq!(sorted, MetalCode::ALL);
        assert_eq!(MetalCode::ALL[0], MetalCode::Cd);
        assert_eq!(MetalCode::ALL[7], MetalCode::Mn);
    }

    #[test]
    fn test_category_breakpoints() {
        assert_eq!(Category::from_index(0.0), Category::Safe);
        assert_eq!(Category::from_index(100.0), Category::Safe);
        assert_eq!(Category::from_index(100.01), Category::Moderate);
        assert_eq!(Category::from_index(200.0), Category::Moderate);
        assert_eq!(Category::from_index(200.01), Category::Hazardous);
    }

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&Category::Hazardous).unwrap();
        assert_eq!(json, "\"hazardous\"");
        let metal: MetalCode = serde_json::from_str("\"zn\"").unwrap();
        assert_eq!(metal, MetalCode::Zn);
    }
}
