//! 题组渲染上下文
//!
//! 封装"我正在渲染哪一篇的哪一个题组"这一信息，仅用于日志

use std::fmt::Display;

/// 题组渲染上下文
#[derive(Debug, Clone)]
pub struct GroupCtx {
    /// 试卷ID
    pub test_id: String,

    /// 篇章索引（从1开始）
    pub passage_index: usize,

    /// 题组ID
    pub group_id: String,
}

impl GroupCtx {
    pub fn new(test_id: impl Into<String>, passage_index: usize, group_id: impl Into<String>) -> Self {
        Self {
            test_id: test_id.into(),
            passage_index,
            group_id: group_id.into(),
        }
    }
}

impl Display for GroupCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[试卷 ID#{} 篇章#{} 题组#{}]",
            self.test_id, self.passage_index, self.group_id
        )
    }
}
