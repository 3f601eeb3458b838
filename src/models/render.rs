//! 渲染树（引擎的输出契约）
//!
//! 只描述结构与正确性标记，不涉及任何样式

use crate::models::question::OptionItem;
use serde::{Deserialize, Serialize};

/// 整套试卷的渲染结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderTree {
    pub test_id: String,
    pub title: String,
    pub passages: Vec<PassageView>,
}

/// 单个篇章
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassageView {
    pub title: String,
    pub body: PassageBody,
    pub groups: Vec<GroupView>,
}

/// 篇章正文：无答案区间时按行分块，有答案区间时输出高亮文本流
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", content = "items", rename_all = "snake_case")]
pub enum PassageBody {
    Blocks(Vec<TextBlock>),
    Highlighted(Vec<TextRun>),
}

/// 行级文本块
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum TextBlock {
    Heading(String),
    Paragraph(String),
}

/// 高亮文本流中的一段
///
/// `question_number` / `answer_value` 只用于展示（如提示框），不参与判定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextRun {
    Plain {
        text: String,
    },
    Highlight {
        text: String,
        question_number: u32,
        answer_value: String,
    },
}

/// 插槽解析后的节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderedNode {
    Text { value: String },
    Answer { order: u32, correct_answer: String },
    Placeholder { slot_id: String, label: String },
}

/// 单个题组
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupView {
    pub group_id: String,
    pub title: String,
    pub instructions: String,
    pub content: Vec<RenderedNode>,
    pub body: GroupBody,
}

/// 多选题布局
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceLayout {
    /// 所有题目共用题组选项池
    ChooseFromList,
    /// 每道题拥有自己的选项
    PerQuestion,
}

/// 带正确性标记的选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionView {
    pub key: String,
    pub text: String,
    pub correct: bool,
}

impl OptionView {
    pub fn new(option: &OptionItem, correct: bool) -> Self {
        Self {
            key: option.key.clone(),
            text: option.text.clone(),
            correct,
        }
    }
}

/// 选择类题目（判断题、多选题共用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceQuestionView {
    pub order: u32,
    pub prompt: String,
    pub options: Vec<OptionView>,
}

/// 自由作答题目（只读展示正确答案）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTextView {
    pub order: u32,
    pub label: String,
    pub correct_answer: String,
}

/// 题组主体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum GroupBody {
    BooleanChoice {
        questions: Vec<ChoiceQuestionView>,
    },
    MultipleChoice {
        layout: ChoiceLayout,
        /// 共用选项池（仅 `ChooseFromList` 非空）
        pool: Vec<OptionItem>,
        questions: Vec<ChoiceQuestionView>,
    },
    Table {
        columns: Vec<String>,
        /// 行 → 单元格 → 节点
        rows: Vec<Vec<Vec<RenderedNode>>>,
    },
    FreeText {
        questions: Vec<FreeTextView>,
    },
}
