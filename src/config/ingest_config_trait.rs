// ==========================================
// 重金属污染指数计算系统 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入 / 报告所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

// ==========================================
// IngestConfigReader Trait
// ==========================================
// 用途: 导入模块与 API 层依赖的配置读取接口
// 实现者: ConfigManager（从 JSON 配置文件读取）
pub trait IngestConfigReader: Send + Sync {
    /// 导入文件大小上限（字节）
    ///
    /// # 默认值
    /// - 10485760 (10 MiB)
    fn max_file_bytes(&self) -> u64;

    /// 缺省样品名前缀
    ///
    /// # 默认值
    /// - "Sample"
    fn default_name_prefix(&self) -> String;

    /// 报告是否包含建议段落
    ///
    /// # 默认值
    /// - true
    fn include_recommendations(&self) -> bool;

    /// 日志过滤器（RUST_LOG 未设置时生效）
    ///
    /// # 默认值
    /// - "info"
    fn log_filter(&self) -> String;
}
