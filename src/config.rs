use crate::error::{AppResult, FileError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 渲染引擎参数
///
/// 只包含影响渲染结果的配置，与文件/并发等运行参数分开
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// 小于该字符数且不以终止符结尾的行视为标题
    pub heading_max_chars: usize,
    /// 段落终止符
    pub heading_terminators: String,
    /// 插槽 id 匹配表达式，第一个捕获组为题号
    pub slot_pattern: String,
    /// 无法解析的插槽显示的占位文本
    pub slot_placeholder: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            heading_max_chars: 80,
            heading_terminators: ".,;".to_string(),
            slot_pattern: r"Q([0-9]+)".to_string(),
            slot_placeholder: "______".to_string(),
        }
    }
}

/// 程序配置文件
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 同时加载的快照文件数量
    pub max_concurrent_files: usize,
    /// 待渲染快照目录
    pub input_folder: String,
    /// 渲染结果输出目录
    pub output_folder: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 是否输出带缩进的 JSON
    pub pretty_output: bool,
    // --- 渲染参数 ---
    pub render: RenderOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_files: 8,
            input_folder: "snapshots".to_string(),
            output_folder: "rendered".to_string(),
            verbose_logging: false,
            output_log_file: "render_log.txt".to_string(),
            pretty_output: true,
            render: RenderOptions::default(),
        }
    }
}

impl Config {
    /// 从环境变量读取配置，缺失或无法解析的值使用默认值
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件读取配置
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(FileError::NotFound { path: display }.into());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::AppError::file_read_failed(display.clone(), e))?;
        let config = toml::from_str(&content).map_err(|source| FileError::TomlParseFailed {
            path: display,
            source,
        })?;
        Ok(config)
    }

    /// 加载配置：`RENDER_CONFIG` 指定的文件（如有）叠加环境变量，否则只读环境变量
    pub fn load() -> AppResult<Self> {
        match std::env::var("RENDER_CONFIG") {
            Ok(path) => Ok(Self::from_toml_file(Path::new(&path))?.with_env_overrides()),
            Err(_) => Ok(Self::from_env()),
        }
    }

    fn with_env_overrides(self) -> Self {
        let render = RenderOptions {
            heading_max_chars: std::env::var("HEADING_MAX_CHARS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.render.heading_max_chars),
            heading_terminators: self.render.heading_terminators,
            slot_pattern: std::env::var("SLOT_PATTERN").unwrap_or(self.render.slot_pattern),
            slot_placeholder: std::env::var("SLOT_PLACEHOLDER").unwrap_or(self.render.slot_placeholder),
        };
        Self {
            max_concurrent_files: std::env::var("MAX_CONCURRENT_FILES").ok().and_then(|v| v.parse().ok()).unwrap_or(self.max_concurrent_files),
            input_folder: std::env::var("INPUT_FOLDER").unwrap_or(self.input_folder),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(self.output_folder),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
            pretty_output: std::env::var("PRETTY_OUTPUT").ok().and_then(|v| v.parse().ok()).unwrap_or(self.pretty_output),
            render,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_render_options() {
        let options = RenderOptions::default();
        assert_eq!(options.heading_max_chars, 80);
        assert_eq!(options.heading_terminators, ".,;");
        assert_eq!(options.slot_pattern, r"Q([0-9]+)");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        // 只写部分字段，其余字段回落到默认值
        let config: Config = toml::from_str(
            r#"
            input_folder = "in"
            [render]
            heading_max_chars = 60
            "#,
        )
        .unwrap();

        assert_eq!(config.input_folder, "in");
        assert_eq!(config.output_folder, "rendered");
        assert_eq!(config.render.heading_max_chars, 60);
        assert_eq!(config.render.slot_placeholder, "______");
    }

    #[test]
    fn test_load_without_config_file_reads_env() {
        if std::env::var("RENDER_CONFIG").is_ok() {
            return;
        }
        let loaded = Config::load().unwrap();
        let from_env = Config::from_env();
        assert_eq!(loaded.render, from_env.render);
        assert_eq!(loaded.input_folder, from_env.input_folder);
        assert_eq!(loaded.max_concurrent_files, from_env.max_concurrent_files);
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::from_toml_file(Path::new("/definitely/not/here.toml"));
        assert!(matches!(
            result,
            Err(crate::error::AppError::File(FileError::NotFound { .. }))
        ));
    }
}
