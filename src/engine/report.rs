// ==========================================
// 重金属污染指数计算系统 - 分析报告生成
// ==========================================
// 职责: 样品集合 → 汇总统计 + 纯文本报告
// 红线: 纯函数,给定样品集合与生成时间输出确定
// ==========================================

use crate::domain::sample::Sample;
use crate::domain::standards::StandardsTable;
use crate::domain::types::Category;
use crate::engine::aggregate::SummaryStats;
use chrono::{DateTime, NaiveDate, Utc};

/// 报告标题
pub const REPORT_TITLE: &str = "HEAVY METAL POLLUTION INDEX (HMPI) ANALYSIS REPORT";

/// 明细段标题
pub const DETAILED_RESULTS_HEADING: &str = "DETAILED RESULTS";

/// 报告选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub include_recommendations: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            include_recommendations: true,
        }
    }
}

/// 导出文件名: HMPI_Report_YYYY-MM-DD.txt
pub fn report_file_name(date: NaiveDate) -> String {
    format!("HMPI_Report_{}.txt", date.format("%Y-%m-%d"))
}

// ==========================================
// ReportAggregator - 报告聚合器
// ==========================================
pub struct ReportAggregator {
    options: ReportOptions,
    standards: &'static StandardsTable,
}

impl Default for ReportAggregator {
    fn default() -> Self {
        Self::new(ReportOptions::default())
    }
}

impl ReportAggregator {
    pub fn new(options: ReportOptions) -> Self {
        Self {
            options,
            standards: StandardsTable::global(),
        }
    }

    /// 汇总统计
    pub fn summarize(&self, samples: &[Sample]) -> SummaryStats {
        SummaryStats::from_samples(samples)
    }

    /// 生成纯文本报告
    ///
    /// # 参数
    /// - samples: 按展示顺序排列的样品集合
    /// - generated_at: 报告生成时间（写入报告头）
    pub fn render(&self, samples: &[Sample], generated_at: DateTime<Utc>) -> String {
        let stats = self.summarize(samples);
        let mut lines: Vec<String> = Vec::new();

        // ===== 报告头 =====
        lines.push(REPORT_TITLE.to_string());
        lines.push(format!(
            "Generated on: {}",
            generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        lines.push(String::new());

        // ===== 汇总 =====
        lines.push("EXECUTIVE SUMMARY".to_string());
        lines.push("=================".to_string());
        lines.push(format!("Total Samples Analyzed: {}", stats.total));
        lines.push(format!("Average HMPI: {:.2}", stats.mean_index));
        lines.push(String::new());
        lines.push("Sample Distribution:".to_string());
        for category in Category::ALL {
            lines.push(format!(
                "- {}: {} samples ({:.1}%)",
                Self::category_label(category),
                stats.count(category),
                stats.percentage(category)
            ));
        }
        lines.push(String::new());

        // ===== 明细 =====
        lines.push(DETAILED_RESULTS_HEADING.to_string());
        lines.push("================".to_string());
        for (position, sample) in samples.iter().enumerate() {
            lines.push(String::new());
            self.render_sample(&mut lines, position + 1, sample);
        }

        // ===== 建议 =====
        if self.options.include_recommendations {
            lines.push(String::new());
            self.render_recommendations(&mut lines, &stats);
        }

        lines.push(String::new());
        lines.push("This report was generated by the HMPI Calculator Tool.".to_string());
        lines.push(
            "For questions or additional analysis, consult with water quality professionals."
                .to_string(),
        );

        lines.join("\n")
    }

    fn category_label(category: Category) -> &'static str {
        match category {
            Category::Safe => "Safe (HMPI ≤ 100)",
            Category::Moderate => "Moderate Risk (100 < HMPI ≤ 200)",
            Category::Hazardous => "Hazardous (HMPI > 200)",
        }
    }

    fn render_sample(&self, lines: &mut Vec<String>, position: usize, sample: &Sample) {
        let result = &sample.result;

        lines.push(format!("Sample {}: {}", position, sample.name));
        lines.push(format!(
            "HMPI: {:.2} ({})",
            result.index,
            result.category.as_str().to_uppercase()
        ));
        lines.push(format!(
            "Dominant Metal: {}",
            result
                .dominant_metal
                .map(|m| m.to_string())
                .unwrap_or_else(|| "None".to_string())
        ));
        lines.push(match &sample.coordinates {
            Some(coords) => format!("Location: {}", coords.format_short()),
            None => "Location: Not specified".to_string(),
        });

        lines.push("Metal Concentrations (mg/L):".to_string());
        for (metal, concentration) in sample.concentrations.iter() {
            let threshold = self.standards.threshold(metal);
            lines.push(format!(
                "  {}: {:.3} (Standard: {}, Ratio: {:.2})",
                metal,
                concentration,
                threshold,
                concentration / threshold
            ));
        }

        lines.push("Individual Contributions (%):".to_string());
        for (metal, contribution) in &result.contributions {
            lines.push(format!("  {}: {:.2}%", metal, contribution));
        }
    }

    fn render_recommendations(&self, lines: &mut Vec<String>, stats: &SummaryStats) {
        lines.push("RECOMMENDATIONS".to_string());
        lines.push("===============".to_string());

        if stats.hazardous > 0 {
            lines.push(format!(
                "- URGENT: {} sample(s) show hazardous pollution levels requiring immediate attention",
                stats.hazardous
            ));
        }
        if stats.moderate > 0 {
            lines.push(format!(
                "- {} sample(s) require treatment before consumption",
                stats.moderate
            ));
        }
        if stats.safe > 0 {
            lines.push(format!(
                "- {} sample(s) are within safe limits for consumption",
                stats.safe
            ));
        }

        lines.push(String::new());
        lines.push("- Regular monitoring is recommended for all water sources".to_string());
        lines.push("- Consider source protection measures for contaminated areas".to_string());
        lines.push("- Implement appropriate treatment technologies where needed".to_string());
    }
}
