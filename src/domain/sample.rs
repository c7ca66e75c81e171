// ==========================================
// 重金属污染指数计算系统 - 样品领域模型
// ==========================================
// 职责: 浓度表 / 计算结果 / 坐标 / 样品实体
// 红线: 不含计算逻辑,计算结果只由 IndexEngine 产出
// 序列化: Sample 的 JSON 形态即持久化契约
// ==========================================

use crate::domain::types::{Category, MetalCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// ==========================================
// ConcentrationMap - 金属浓度表 (mg/L)
// ==========================================
// 缺失或 0 表示未检出; 值恒为非负且不超过 MAX_CONCENTRATION
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<MetalCode, f64>",
    into = "BTreeMap<MetalCode, f64>"
)]
pub struct ConcentrationMap(BTreeMap<MetalCode, f64>);

/// 浓度上限 (mg/L)，超出按上限截断，保证分指数与综合指数恒为有限值
pub const MAX_CONCENTRATION: f64 = 1.0e6;

impl ConcentrationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入浓度（负值 / 非有限值按 0 处理，超上限截断）
    pub fn set(&mut self, metal: MetalCode, value: f64) {
        let sanitized = if value.is_finite() && value > 0.0 {
            value.min(MAX_CONCENTRATION)
        } else {
            0.0
        };
        self.0.insert(metal, sanitized);
    }

    /// 读取浓度（缺失视为 0）
    pub fn get(&self, metal: MetalCode) -> f64 {
        self.0.get(&metal).copied().unwrap_or(0.0)
    }

    /// 按固定金属顺序遍历已记录的浓度
    pub fn iter(&self) -> impl Iterator<Item = (MetalCode, f64)> + '_ {
        self.0.iter().map(|(m, v)| (*m, *v))
    }

    /// 仅遍历严格为正的浓度
    pub fn positive(&self) -> impl Iterator<Item = (MetalCode, f64)> + '_ {
        self.iter().filter(|(_, v)| *v > 0.0)
    }

    /// 是否至少有一个正值
    pub fn has_positive(&self) -> bool {
        self.positive().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(MetalCode, f64)> for ConcentrationMap {
    fn from_iter<I: IntoIterator<Item = (MetalCode, f64)>>(iter: I) -> Self {
        let mut map = ConcentrationMap::new();
        for (metal, value) in iter {
            map.set(metal, value);
        }
        map
    }
}

// 反序列化同样经过 set() 清洗
impl From<BTreeMap<MetalCode, f64>> for ConcentrationMap {
    fn from(raw: BTreeMap<MetalCode, f64>) -> Self {
        raw.into_iter().collect()
    }
}

impl From<ConcentrationMap> for BTreeMap<MetalCode, f64> {
    fn from(map: ConcentrationMap) -> Self {
        map.0
    }
}

// ==========================================
// ComputationResult - 指数计算结果
// ==========================================
// 不可变; 完全由 ConcentrationMap 派生
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputationResult {
    pub index: f64,                              // 综合指数（≥ 0，两位小数）
    pub contributions: BTreeMap<MetalCode, f64>, // 分指数百分比（浓度/限值 × 100）
    pub category: Category,                      // 风险分类
    pub dominant_metal: Option<MetalCode>,       // 主导金属
}

// ==========================================
// Coordinates - 采样坐标
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// 构造坐标（任一分量缺失 / 越界 / 非有限则返回 None）
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        let (lat, lon) = (latitude?, longitude?);
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        valid.then_some(Self {
            latitude: lat,
            longitude: lon,
        })
    }

    /// 简短格式（4 位小数）
    pub fn format_short(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

// ==========================================
// Sample - 样品实体
// ==========================================
// 生命周期: 手工录入/批量导入创建 → 会话内存集合持有 → 单独删除
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub id: Uuid,
    pub name: String,
    pub coordinates: Option<Coordinates>,
    pub concentrations: ConcentrationMap,
    pub result: ComputationResult,
    pub created_at: DateTime<Utc>,
}

impl Sample {
    /// 创建新样品（自动生成 id 与创建时间）
    pub fn new(
        name: String,
        coordinates: Option<Coordinates>,
        concentrations: ConcentrationMap,
        result: ComputationResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            coordinates,
            concentrations,
            result,
            created_at: Utc::now(),
        }
    }

    pub fn category(&self) -> Category {
        self.result.category
    }

    pub fn index(&self) -> f64 {
        self.result.index
    }
}
