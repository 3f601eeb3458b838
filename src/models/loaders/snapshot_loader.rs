use crate::error::{AppError, AppResult, FileError};
use crate::models::snapshot::Test;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 快照文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Toml,
}

impl SnapshotFormat {
    /// 根据扩展名判断格式
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(SnapshotFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Some(SnapshotFormat::Toml),
            _ => None,
        }
    }
}

/// 解析快照文本
///
/// # 参数
/// - `content`: 文件内容
/// - `format`: 文件格式
/// - `origin`: 来源（仅用于错误信息）
pub fn parse_snapshot(content: &str, format: SnapshotFormat, origin: &str) -> AppResult<Test> {
    let test = match format {
        SnapshotFormat::Json => {
            serde_json::from_str(content).map_err(|source| FileError::JsonParseFailed {
                path: origin.to_string(),
                source,
            })?
        }
        SnapshotFormat::Toml => {
            toml::from_str(content).map_err(|source| FileError::TomlParseFailed {
                path: origin.to_string(),
                source,
            })?
        }
    };
    Ok(test)
}

/// 从 JSON / TOML 文件加载试卷快照
pub async fn load_test_snapshot(path: &Path) -> AppResult<Test> {
    let display = path.display().to_string();
    let format = SnapshotFormat::from_path(path).ok_or_else(|| FileError::UnsupportedFormat {
        path: display.clone(),
    })?;

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(display.clone(), e))?;

    parse_snapshot(&content, format, &display)
}

/// 单个快照文件的加载结果
pub type LoadedSnapshot = (PathBuf, AppResult<Test>);

/// 从文件夹中加载所有快照，按文件路径排序返回
///
/// 单个文件加载失败不影响其他文件，失败结果原样返回交由调用方统计
pub async fn load_all_snapshots(
    folder_path: &str,
    max_concurrent: usize,
) -> AppResult<Vec<LoadedSnapshot>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?
    {
        let path = entry.path();
        if SnapshotFormat::from_path(&path).is_some() {
            paths.push(path);
        }
    }

    let mut loaded: Vec<LoadedSnapshot> = stream::iter(paths)
        .map(|path| async move {
            let result = load_test_snapshot(&path).await;
            match &result {
                Ok(test) => tracing::info!(
                    "成功加载 {}: {} 个篇章",
                    path.file_name().unwrap_or_default().to_string_lossy(),
                    test.passages.len()
                ),
                Err(e) => tracing::warn!("加载文件失败 {}: {}", path.display(), e),
            }
            (path, result)
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;

    loaded.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_all_keeps_failures() {
        let dir = std::env::temp_dir().join(format!("passage_render_loader_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a.json"), r#"{"id": "a"}"#).unwrap();
        std::fs::write(dir.join("b.json"), "{ not json").unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let loaded = load_all_snapshots(&dir.to_string_lossy(), 2).await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded[0].0.ends_with("a.json"));
        assert!(loaded[0].1.is_ok());
        assert!(loaded[1].0.ends_with("b.json"));
        assert!(matches!(
            loaded[1].1,
            Err(AppError::File(FileError::JsonParseFailed { .. }))
        ));
    }

    #[tokio::test]
    async fn test_load_all_missing_folder() {
        let err = load_all_snapshots("/nonexistent/passage_render", 2)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::File(FileError::DirectoryNotFound { .. })));
    }
}
