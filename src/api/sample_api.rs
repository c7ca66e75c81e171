// ==========================================
// 重金属污染指数计算系统 - 样品API
// ==========================================
// 职责: 封装样品计算 / 导入 / 查询 / 导出
// 红线: 替换与追加是两个独立操作,不由调用上下文推断
// 红线: 导入闸门持有期间完成集合替换
// ==========================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::app::AppState;
use crate::domain::record::RawRecord;
use crate::domain::sample::Sample;
use crate::domain::standards::StandardsTable;
use crate::domain::types::{Category, MetalCode};
use crate::engine::{mean_concentrations, report_file_name, ReportAggregator, ReportOptions, SummaryStats};
use crate::importer::{BulkIngestor, IngestReport, InputFormat, MemorySource, SampleSource};

/// 导入API响应
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportApiResponse {
    /// 输入数据行总数
    pub total_rows: usize,
    /// 接受的样品数量
    pub accepted: usize,
    /// 跳过的行数（未通过校验 + 无法解析）
    pub skipped: usize,
    /// 未通过校验的行数
    pub rejected: usize,
    /// 无法解析的行数
    pub malformed: usize,
    /// 导入耗时（毫秒）
    pub elapsed_ms: i64,
}

impl ImportApiResponse {
    fn from_report(report: &IngestReport, started: Instant) -> Self {
        Self {
            total_rows: report.total_rows,
            accepted: report.accepted,
            skipped: report.skipped(),
            rejected: report.rejected,
            malformed: report.malformed,
            elapsed_ms: started.elapsed().as_millis() as i64,
        }
    }
}

/// 导出报告
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedReport {
    pub file_name: String,
    pub content: String,
}

/// 单个金属明细
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalBreakdown {
    pub metal: MetalCode,
    pub name: &'static str,
    pub concentration: f64,
    pub threshold: f64,
    pub ratio: f64,
    pub contribution: f64,
    pub health_effects: &'static str,
}

/// 样品详情
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleDetail {
    pub sample: Sample,
    pub metals: Vec<MetalBreakdown>, // 仅包含已检出（浓度 > 0）的金属
}

/// 样品API
pub struct SampleApi {
    state: Arc<AppState>,
    standards: &'static StandardsTable,
}

impl SampleApi {
    /// 创建新的SampleApi实例
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            standards: StandardsTable::global(),
        }
    }

    fn ingestor(&self) -> BulkIngestor {
        BulkIngestor::new(self.state.config.default_name_prefix())
    }

    fn report_aggregator(&self) -> ReportAggregator {
        ReportAggregator::new(ReportOptions {
            include_recommendations: self.state.config.include_recommendations(),
        })
    }

    // ==========================================
    // 手工录入
    // ==========================================

    /// 单样品计算（替换当前集合）
    ///
    /// # 返回
    /// - Ok(Sample): 计算结果（缺省名 "Sample 1"）
    /// - Err(ValidationError): 无有效测量值,集合保持不变
    /// - Err(IngestionInProgress): 批量导入进行中
    #[instrument(skip(self, raw))]
    pub fn calculate_single(&self, raw: &RawRecord) -> ApiResult<Sample> {
        let _gate = self.state.begin_ingestion()?;
        let sample = self.ingestor().build_sample(raw, 1)?;

        self.state.store()?.replace_all(vec![sample.clone()]);
        info!(sample_id = %sample.id, index = sample.index(), "单样品计算完成");
        Ok(sample)
    }

    /// 加入数据集（追加到当前集合）
    ///
    /// # 返回
    /// - Ok(Sample): 计算结果（缺省名 "Sample <当前数量+1>"）
    #[instrument(skip(self, raw))]
    pub fn add_to_dataset(&self, raw: &RawRecord) -> ApiResult<Sample> {
        let _gate = self.state.begin_ingestion()?;
        let mut store = self.state.store()?;
        let sample = self.ingestor().build_sample(raw, store.len() + 1)?;

        store.append_one(sample.clone());
        info!(sample_id = %sample.id, total = store.len(), "样品已加入数据集");
        Ok(sample)
    }

    // ==========================================
    // 批量导入
    // ==========================================

    /// 从文本批量导入（替换当前集合）
    ///
    /// # 参数
    /// - text: 输入文本
    /// - format_tag: "csv" | "json"（大小写不敏感）
    pub async fn import_text(&self, text: &str, format_tag: &str) -> ApiResult<ImportApiResponse> {
        let format: InputFormat = format_tag.parse()?;
        self.import_source(&MemorySource::new(text, format)).await
    }

    /// 从输入来源批量导入（替换当前集合）
    ///
    /// # 返回
    /// - Ok(ImportApiResponse): 行计数
    /// - Err(IngestionInProgress): 已有导入在进行
    /// - Err(ImportError / InvalidInput): 读取失败或格式不支持,集合保持不变
    #[instrument(skip(self, source), fields(source = %source.describe()))]
    pub async fn import_source(&self, source: &dyn SampleSource) -> ApiResult<ImportApiResponse> {
        let started = Instant::now();
        let _gate = self.state.begin_ingestion()?;

        let format = source.format()?;
        let text = source.read_text().await?;
        let report = self.ingestor().ingest_text(&text, format)?;
        let response = ImportApiResponse::from_report(&report, started);

        self.state.store()?.replace_all(report.samples);
        info!(
            accepted = response.accepted,
            skipped = response.skipped,
            "数据集已替换"
        );
        Ok(response)
    }

    // ==========================================
    // 查询与维护
    // ==========================================

    /// 删除单个样品
    pub fn delete_sample(&self, id: Uuid) -> ApiResult<()> {
        if self.state.store()?.remove(id) {
            info!(sample_id = %id, "样品已删除");
            Ok(())
        } else {
            Err(ApiError::NotFound(format!("样品 {}", id)))
        }
    }

    /// 样品列表（按集合顺序; None 表示全部分类）
    pub fn list_samples(&self, filter: Option<Category>) -> ApiResult<Vec<Sample>> {
        Ok(self.state.store()?.filter_by_category(filter))
    }

    /// 汇总统计
    pub fn summary(&self) -> ApiResult<SummaryStats> {
        let store = self.state.store()?;
        Ok(self.report_aggregator().summarize(store.as_slice()))
    }

    /// 各金属平均浓度（空集合返回空表）
    pub fn mean_concentrations(&self) -> ApiResult<BTreeMap<MetalCode, f64>> {
        let store = self.state.store()?;
        Ok(mean_concentrations(store.as_slice()))
    }

    /// 导出文本报告
    ///
    /// # 返回
    /// - Ok(ExportedReport): 文件名 + 报告内容
    /// - Err(NoData): 集合为空
    pub fn export_report(&self) -> ApiResult<ExportedReport> {
        let samples = self.state.store()?.snapshot();
        if samples.is_empty() {
            return Err(ApiError::NoData);
        }

        let now = Utc::now();
        let content = self.report_aggregator().render(&samples, now);
        info!(samples = samples.len(), bytes = content.len(), "报告已生成");
        Ok(ExportedReport {
            file_name: report_file_name(now.date_naive()),
            content,
        })
    }

    /// 样品详情
    pub fn sample_detail(&self, id: Uuid) -> ApiResult<SampleDetail> {
        let sample = self
            .state
            .store()?
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("样品 {}", id)))?;

        let metals = sample
            .concentrations
            .positive()
            .map(|(metal, concentration)| {
                let threshold = self.standards.threshold(metal);
                let info = self.standards.info(metal);
                MetalBreakdown {
                    metal,
                    name: info.name,
                    concentration,
                    threshold,
                    ratio: concentration / threshold,
                    contribution: sample.result.contributions.get(&metal).copied().unwrap_or(0.0),
                    health_effects: info.health_effects,
                }
            })
            .collect();

        Ok(SampleDetail { sample, metals })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> SampleApi {
        SampleApi::new(Arc::new(AppState::default()))
    }

    #[test]
    fn test_calculate_single_replaces_collection() {
        let api = api();
        api.add_to_dataset(&RawRecord::new().with("cd", "0.001")).unwrap();
        api.add_to_dataset(&RawRecord::new().with("cd", "0.002")).unwrap();

        let sample = api
            .calculate_single(&RawRecord::new().with("pb", "0.01"))
            .unwrap();
        assert_eq!(sample.name, "Sample 1");
        assert_eq!(sample.index(), 100.0);

        let samples = api.list_samples(None).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].id, sample.id);
    }

    #[test]
    fn test_add_to_dataset_appends_with_position_name() {
        let api = api();
        let first = api.add_to_dataset(&RawRecord::new().with("cu", "1.0")).unwrap();
        let second = api
            .add_to_dataset(&RawRecord::new().with("cu", "1.0").with("name", "Tap"))
            .unwrap();
        let third = api.add_to_dataset(&RawRecord::new().with("cu", "1.0")).unwrap();

        assert_eq!(first.name, "Sample 1");
        assert_eq!(second.name, "Tap");
        assert_eq!(third.name, "Sample 3");
    }

    #[test]
    fn test_rejected_record_leaves_collection_untouched() {
        let api = api();
        api.add_to_dataset(&RawRecord::new().with("fe", "0.1")).unwrap();

        let err = api
            .calculate_single(&RawRecord::new().with("fe", "0"))
            .unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));
        assert_eq!(api.list_samples(None).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_and_detail() {
        let api = api();
        let sample = api
            .add_to_dataset(&RawRecord::new().with("cd", "0.006").with("zn", "1.5"))
            .unwrap();

        let detail = api.sample_detail(sample.id).unwrap();
        assert_eq!(detail.metals.len(), 2);
        assert_eq!(detail.metals[0].metal, MetalCode::Cd);
        assert_eq!(detail.metals[0].ratio, 2.0);
        assert_eq!(detail.metals[0].contribution, 200.0);

        api.delete_sample(sample.id).unwrap();
        assert!(matches!(api.delete_sample(sample.id), Err(ApiError::NotFound(_))));
        assert!(matches!(api.sample_detail(sample.id), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_export_report_requires_data() {
        let api = api();
        assert!(matches!(api.export_report(), Err(ApiError::NoData)));

        api.add_to_dataset(&RawRecord::new().with("mn", "0.2")).unwrap();
        let report = api.export_report().unwrap();
        assert!(report.file_name.starts_with("HMPI_Report_"));
        assert!(report.file_name.ends_with(".txt"));
        assert!(report.content.contains("Sample 1: Sample 1"));
    }

    #[tokio::test]
    async fn test_import_text_rejects_unknown_format() {
        let api = api();
        let err = api.import_text("cd\n0.1\n", "xlsx").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }
}
