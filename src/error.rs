use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 内容缺失错误（只有整段缺失才会上抛）
    #[error("内容错误: {0}")]
    Content(#[from] ContentError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 内容缺失错误
///
/// 单个答案区间、插槽或题组的问题都在渲染过程中降级处理，
/// 这里只保留调用方必须知道的"内容不可用"情况。
#[derive(Debug, Error)]
pub enum ContentError {
    /// 篇章正文缺失
    #[error("篇章 {passage_index} ({title}) 正文不可用")]
    PassageTextUnavailable { passage_index: usize, title: String },
    /// 篇章题组列表缺失
    #[error("篇章 {passage_index} ({title}) 题组列表不可用")]
    GroupsUnavailable { passage_index: usize, title: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({path}): {source}")]
    JsonParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 不支持的文件格式
    #[error("不支持的文件格式: {path}")]
    UnsupportedFormat { path: String },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 插槽匹配表达式无效
    #[error("插槽表达式 '{pattern}' 无效: {source}")]
    InvalidSlotPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    /// 插槽匹配表达式缺少捕获组
    #[error("插槽表达式 '{pattern}' 必须包含一个数字捕获组")]
    MissingCaptureGroup { pattern: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 是否为"内容不可用"错误
    pub fn is_content_unavailable(&self) -> bool {
        matches!(self, AppError::Content(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
