// ==========================================
// 重金属污染指数计算系统 - 命令行入口
// ==========================================
// 用法: hmpi-calculator <数据文件.csv|.json> [报告输出路径]
// ==========================================

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use hmpi_calculator::api::SampleApi;
use hmpi_calculator::app::AppState;
use hmpi_calculator::config::{ConfigManager, IngestConfigReader};
use hmpi_calculator::domain::types::Category;
use hmpi_calculator::importer::FileSource;
use hmpi_calculator::logging;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (input, report_out) = match args.as_slice() {
        [input] => (input.clone(), None),
        [input, out] => (input.clone(), Some(out.clone())),
        _ => bail!("用法: hmpi-calculator <数据文件.csv|.json> [报告输出路径]"),
    };

    // 加载配置（日志初始化之前,配置日志级别需要先读取）
    let config = ConfigManager::load().context("加载配置失败")?;
    logging::init_with_default(&config.log_filter());

    tracing::info!("==================================================");
    tracing::info!("{}", hmpi_calculator::APP_NAME);
    tracing::info!("系统版本: {}", hmpi_calculator::VERSION);
    tracing::info!("==================================================");
    tracing::debug!(config = ?config.get_config_snapshot(), "生效配置");

    let max_bytes = config.max_file_bytes();
    let state = Arc::new(AppState::new(Arc::new(config)));
    let api = SampleApi::new(state);

    let runtime = tokio::runtime::Runtime::new().context("无法创建异步运行时")?;
    let response = runtime
        .block_on(api.import_source(&FileSource::new(&input, max_bytes)))
        .with_context(|| format!("导入失败: {}", input))?;

    let summary = api.summary()?;
    println!(
        "导入完成: {} 行, 接受 {}, 跳过 {}",
        response.total_rows, response.accepted, response.skipped
    );
    println!("平均 HMPI: {:.2}", summary.mean_index);
    for category in Category::ALL {
        println!(
            "  {}: {} ({:.1}%)",
            category,
            summary.count(category),
            summary.percentage(category)
        );
    }

    if summary.total == 0 {
        println!("没有可导出的数据");
        return Ok(());
    }

    let report = api.export_report().context("生成报告失败")?;
    match report_out {
        Some(path) => {
            std::fs::write(&path, &report.content)
                .with_context(|| format!("写入报告失败: {}", path))?;
            println!("报告已写入: {}", path);
        }
        None => println!("\n{}", report.content),
    }

    Ok(())
}
