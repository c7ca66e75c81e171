// ==========================================
// 重金属污染指数计算系统 - 汇总统计
// ==========================================
// 职责: 分类计数 / 平均指数 / 金属平均浓度
// 红线: 空集合不得出现除零（均值、占比均为 0）
// ==========================================

use crate::domain::sample::Sample;
use crate::domain::types::{Category, MetalCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// SummaryStats - 汇总统计
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total: usize,
    pub safe: usize,
    pub moderate: usize,
    pub hazardous: usize,
    pub mean_index: f64,
}

impl SummaryStats {
    /// 从样品集合归约
    pub fn from_samples(samples: &[Sample]) -> Self {
        let mut stats = SummaryStats {
            total: samples.len(),
            safe: 0,
            moderate: 0,
            hazardous: 0,
            mean_index: 0.0,
        };

        let mut index_sum = 0.0;
        for sample in samples {
            match sample.category() {
                Category::Safe => stats.safe += 1,
                Category::Moderate => stats.moderate += 1,
                Category::Hazardous => stats.hazardous += 1,
            }
            index_sum += sample.index();
        }

        if stats.total > 0 {
            stats.mean_index = index_sum / stats.total as f64;
        }
        stats
    }

    /// 某分类的样品数
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Safe => self.safe,
            Category::Moderate => self.moderate,
            Category::Hazardous => self.hazardous,
        }
    }

    /// 某分类占比（百分数,空集合为 0.0）
    pub fn percentage(&self, category: Category) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(category) as f64 / self.total as f64 * 100.0
    }
}

/// 各金属平均浓度（未记录的金属按 0 计入）
///
/// 空集合返回空表
pub fn mean_concentrations(samples: &[Sample]) -> BTreeMap<MetalCode, f64> {
    if samples.is_empty() {
        return BTreeMap::new();
    }

    let count = samples.len() as f64;
    MetalCode::ALL
        .iter()
        .map(|metal| {
            let total: f64 = samples.iter().map(|s| s.concentrations.get(*metal)).sum();
            (*metal, total / count)
        })
        .collect()
}
