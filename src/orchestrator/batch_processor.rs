//! 批量试卷渲染器 - 编排层
//!
//! ## 职责
//!
//! 本模块是命令行程序的入口，负责批量快照的加载、渲染和输出。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：校验渲染参数、写入日志文件头
//! 2. **批量加载**：扫描并并发加载所有快照（`Vec<Test>`）
//! 3. **逐个渲染**：委托 `TestRenderer`，单个快照加载或渲染失败都计入失败数，不影响其他快照
//! 4. **结果输出**：每个快照写出一个 `<文件名含扩展名>.render.json`
//! 5. **全局统计**：汇总成功/失败数量

use crate::config::Config;
use crate::models::registry::QuestionRegistry;
use crate::models::snapshot::Test;
use crate::orchestrator::test_renderer::TestRenderer;
use crate::utils::logging::{
    append_log_line, init_log_file, log_snapshots_loaded, log_startup, print_final_stats,
};
use crate::utils::truncate_text;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    renderer: TestRenderer,
}

/// 渲染统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        let renderer = TestRenderer::new(&config.render).context("渲染参数无效")?;

        init_log_file(&config.output_log_file)?;
        log_startup(&config.input_folder, config.max_concurrent_files);

        Ok(Self { config, renderer })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RenderStats> {
        info!("\n📁 正在扫描待渲染的试卷快照...");
        let snapshots = crate::models::load_all_snapshots(
            &self.config.input_folder,
            self.config.max_concurrent_files,
        )
        .await?;

        if snapshots.is_empty() {
            warn!("⚠️ 没有找到待渲染的快照文件，程序结束");
            return Ok(RenderStats::default());
        }
        log_snapshots_loaded(snapshots.len());

        tokio::fs::create_dir_all(&self.config.output_folder)
            .await
            .with_context(|| format!("无法创建输出目录: {}", self.config.output_folder))?;

        let mut stats = RenderStats {
            total: snapshots.len(),
            ..Default::default()
        };

        for (index, (path, loaded)) in snapshots.iter().enumerate() {
            let snapshot_index = index + 1;
            let test = match loaded {
                Ok(test) => test,
                Err(e) => {
                    stats.failed += 1;
                    error!("[快照 {}] ❌ {} 加载失败: {}", snapshot_index, path.display(), e);
                    append_log_line(
                        &self.config.output_log_file,
                        &format!("失败 | {} | 加载失败: {}", path.display(), e),
                    )?;
                    continue;
                }
            };

            match self.process_snapshot(path, test).await {
                Ok(output) => {
                    stats.success += 1;
                    info!(
                        "[快照 {}] ✓ {} → {}",
                        snapshot_index,
                        truncate_text(&test.title, 40),
                        output.display()
                    );
                    append_log_line(
                        &self.config.output_log_file,
                        &format!("成功 | {} | {}", path.display(), output.display()),
                    )?;
                }
                Err(e) => {
                    stats.failed += 1;
                    error!("[快照 {}] ❌ {} 渲染失败: {:#}", snapshot_index, path.display(), e);
                    append_log_line(
                        &self.config.output_log_file,
                        &format!("失败 | {} | {:#}", path.display(), e),
                    )?;
                }
            }
        }

        print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
        );

        Ok(stats)
    }

    /// 渲染单个快照并写出结果
    async fn process_snapshot(&self, path: &Path, test: &Test) -> Result<PathBuf> {
        let registry = QuestionRegistry::from_test(test);
        let tree = self
            .renderer
            .render(test, &registry)
            .with_context(|| format!("试卷 {} 无法渲染", test.id))?;

        let json = if self.config.pretty_output {
            serde_json::to_string_pretty(&tree)?
        } else {
            serde_json::to_string(&tree)?
        };

        let output = output_path(&self.config.output_folder, path);
        tokio::fs::write(&output, json)
            .await
            .with_context(|| format!("无法写入渲染结果: {}", output.display()))?;

        Ok(output)
    }
}

/// `snapshots/foo.json` → `<output>/foo.json.render.json`
///
/// 保留源文件扩展名，`foo.json` 与 `foo.toml` 不会写到同一个输出文件
fn output_path(output_folder: &str, input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "snapshot".to_string());
    Path::new(output_folder).join(format!("{}.render.json", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        let output = output_path("rendered", Path::new("snapshots/cambridge-18.toml"));
        assert_eq!(output, Path::new("rendered").join("cambridge-18.toml.render.json"));
    }

    #[test]
    fn test_output_path_distinct_per_format() {
        let json = output_path("rendered", Path::new("snapshots/t.json"));
        let toml = output_path("rendered", Path::new("snapshots/t.toml"));
        assert_ne!(json, toml);
        assert_eq!(json, Path::new("rendered").join("t.json.render.json"));
    }
}
