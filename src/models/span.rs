use serde::{Deserialize, Serialize};

/// 锚定在篇章正文上的答案区间（按字符计数，左闭右开）
///
/// 原始数据可能越界、倒置或彼此重叠，由 `SpanResolver` 统一处理
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSpan {
    pub start: i64,
    pub end: i64,
    pub question_number: u32,
    pub answer_value: String,
}

impl AnswerSpan {
    pub fn new(start: i64, end: i64, question_number: u32, answer_value: impl Into<String>) -> Self {
        Self {
            start,
            end,
            question_number,
            answer_value: answer_value.into(),
        }
    }
}

/// 重叠消解后的规范片段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Plain {
        text: String,
    },
    Answer {
        text: String,
        question_number: u32,
        answer_value: String,
    },
}

impl Segment {
    /// 片段对应的原文
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain { text } | Segment::Answer { text, .. } => text,
        }
    }
}
