// ==========================================
// 重金属污染指数计算系统 - 应用状态
// ==========================================
// 职责: 管理会话级别的共享状态（配置 / 样品集合 / 导入闸门）
// 红线: 样品集合仅由 API 层修改; 同一时间最多一个批量导入
// ==========================================

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{Mutex as AsyncMutex, MutexGuard as AsyncMutexGuard};
use uuid::Uuid;

use crate::config::{ConfigManager, IngestConfigReader};
use crate::domain::sample::Sample;
use crate::domain::types::Category;
use crate::importer::error::{ImportError, ImportResult};

// ==========================================
// SampleStore - 会话样品集合
// ==========================================
// 有序; 仅驻留内存,会话结束即丢弃
#[derive(Debug, Clone, Default)]
pub struct SampleStore {
    samples: Vec<Sample>,
}

impl SampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 整体替换（批量导入 / 单样品计算）
    pub fn replace_all(&mut self, samples: Vec<Sample>) {
        self.samples = samples;
    }

    /// 追加单个样品
    pub fn append_one(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// 按 id 删除，返回是否删除
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.samples.len();
        self.samples.retain(|s| s.id != id);
        self.samples.len() != before
    }

    pub fn get(&self, id: Uuid) -> Option<&Sample> {
        self.samples.iter().find(|s| s.id == id)
    }

    /// 当前集合的拷贝（保持顺序）
    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.clone()
    }

    /// 按分类过滤; None 表示全部
    pub fn filter_by_category(&self, category: Option<Category>) -> Vec<Sample> {
        self.samples
            .iter()
            .filter(|s| category.map_or(true, |c| s.category() == c))
            .cloned()
            .collect()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

// ==========================================
// AppState - 应用状态
// ==========================================
pub struct AppState {
    /// 配置读取器
    pub config: Arc<dyn IngestConfigReader>,

    store: Mutex<SampleStore>,

    // 批量导入闸门（持有期间拒绝新的导入）
    ingestion_gate: AsyncMutex<()>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(ConfigManager::default()))
    }
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - config: 配置读取器
    pub fn new(config: Arc<dyn IngestConfigReader>) -> Self {
        tracing::info!("初始化AppState");
        Self {
            config,
            store: Mutex::new(SampleStore::new()),
            ingestion_gate: AsyncMutex::new(()),
        }
    }

    /// 获取样品集合锁
    pub fn store(&self) -> ImportResult<MutexGuard<'_, SampleStore>> {
        self.store
            .lock()
            .map_err(|e| ImportError::InternalError(format!("锁获取失败: {}", e)))
    }

    /// 尝试进入批量导入（不等待）
    ///
    /// # 返回
    /// - Ok(guard): 持有期间其他导入请求失败
    /// - Err(IngestionInProgress): 已有导入在进行
    pub fn begin_ingestion(&self) -> ImportResult<AsyncMutexGuard<'_, ()>> {
        self.ingestion_gate
            .try_lock()
            .map_err(|_| ImportError::IngestionInProgress)
    }

    /// 是否有导入正在进行
    pub fn is_ingesting(&self) -> bool {
        self.ingestion_gate.try_lock().is_err()
    }
}
