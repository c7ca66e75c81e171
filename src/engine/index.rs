// ==========================================
// 重金属污染指数计算系统 - 综合指数引擎
// ==========================================
// 职责: 加权分指数聚合 → 指数 / 贡献度 / 分类 / 主导金属
// 输入: ConcentrationMap
// 输出: ComputationResult
// 红线: 加权算术平均（权重 = 1/限值）,不得退化为简单平均
// 红线: 对任意合法浓度表为全函数,全零输入返回 0 而非错误
// ==========================================

use crate::domain::sample::{ComputationResult, ConcentrationMap, Sample};
use crate::domain::standards::StandardsTable;
use crate::domain::types::{Category, MetalCode};
use std::collections::BTreeMap;
use tracing::error;

/// 加权一致性校验容差
pub const CONSISTENCY_TOLERANCE: f64 = 1e-9;

/// 由指数判定风险分类
pub fn categorize(index: f64) -> Category {
    Category::from_index(index)
}

/// 四舍五入到两位小数
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// 加权累加的中间量
struct WeightedSums {
    numerator: f64,
    denominator: f64,
    contributions: BTreeMap<MetalCode, f64>,
}

// ==========================================
// IndexEngine - 综合指数引擎
// ==========================================
pub struct IndexEngine {
    standards: &'static StandardsTable,
}

impl Default for IndexEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexEngine {
    /// 使用进程级标准限值表构造
    pub fn new() -> Self {
        Self {
            standards: StandardsTable::global(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算单个样品的综合指数
    ///
    /// # 流程
    /// 1. 对每个正浓度金属: 分指数 = 浓度/限值, 贡献度 = 分指数 × 100
    /// 2. 指数 = Σ(分指数 × 权重) / Σ权重 × 100, 保留两位小数
    /// 3. 分类由指数判定, 主导金属为贡献度最大者
    pub fn compute_index(&self, concentrations: &ConcentrationMap) -> ComputationResult {
        let sums = self.accumulate(concentrations);

        if sums.denominator == 0.0 {
            return ComputationResult {
                index: 0.0,
                contributions: BTreeMap::new(),
                category: categorize(0.0),
                dominant_metal: None,
            };
        }

        let raw_index = sums.numerator / sums.denominator * 100.0;
        self.check_consistency(raw_index, &sums.contributions);

        let index = round2(raw_index);
        ComputationResult {
            index,
            category: categorize(index),
            dominant_metal: Self::dominant_metal(&sums.contributions),
            contributions: sums.contributions,
        }
    }

    /// 未取整的加权指数（百分比口径）
    ///
    /// 全零输入返回 0.0
    pub fn raw_weighted_index(&self, concentrations: &ConcentrationMap) -> f64 {
        let sums = self.accumulate(concentrations);
        if sums.denominator == 0.0 {
            0.0
        } else {
            sums.numerator / sums.denominator * 100.0
        }
    }

    /// 由贡献度按同一权重求加权平均
    ///
    /// 与 raw_weighted_index 数值上应一致
    pub fn weighted_mean_of_contributions(&self, contributions: &BTreeMap<MetalCode, f64>) -> f64 {
        let (weighted, total_weight) = contributions.iter().fold(
            (0.0, 0.0),
            |(weighted, total_weight), (metal, contribution)| {
                let weight = self.standards.weight(*metal);
                (weighted + contribution * weight, total_weight + weight)
            },
        );
        if total_weight == 0.0 {
            0.0
        } else {
            weighted / total_weight
        }
    }

    /// 由已存储浓度重新计算样品结果
    pub fn recompute(&self, sample: &Sample) -> ComputationResult {
        self.compute_index(&sample.concentrations)
    }

    // ==========================================
    // 内部计算
    // ==========================================

    fn accumulate(&self, concentrations: &ConcentrationMap) -> WeightedSums {
        let mut sums = WeightedSums {
            numerator: 0.0,
            denominator: 0.0,
            contributions: BTreeMap::new(),
        };

        for (metal, concentration) in concentrations.positive() {
            let sub_index = concentration / self.standards.threshold(metal);
            let weight = self.standards.weight(metal);
            sums.numerator += sub_index * weight;
            sums.denominator += weight;
            sums.contributions.insert(metal, sub_index * 100.0);
        }

        sums
    }

    // 并列时按固定金属顺序取先出现者（严格大于才替换）
    fn dominant_metal(contributions: &BTreeMap<MetalCode, f64>) -> Option<MetalCode> {
        let mut best: Option<(MetalCode, f64)> = None;
        for (metal, contribution) in contributions {
            match best {
                Some((_, max)) if *contribution <= max => {}
                _ => best = Some((*metal, *contribution)),
            }
        }
        best.map(|(metal, _)| metal)
    }

    fn check_consistency(&self, raw_index: f64, contributions: &BTreeMap<MetalCode, f64>) {
        let from_contributions = self.weighted_mean_of_contributions(contributions);
        let diff = (raw_index - from_contributions).abs();
        let tolerance = CONSISTENCY_TOLERANCE * raw_index.abs().max(1.0);
        if !raw_index.is_finite() || diff > tolerance {
            error!(
                raw_index,
                from_contributions, diff, "加权指数与贡献度加权平均不一致"
            );
            debug_assert!(
                raw_index.is_finite() && diff <= tolerance,
                "加权指数一致性校验失败"
            );
        }
    }
}
