//! 题目与题组的领域模型
//!
//! 由快照一次性构建，渲染期间只读

use crate::models::snapshot::{Container, Group, GroupContent, Item, RichNode, WireOption};
use phf::phf_map;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// 题组类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupType {
    TrueFalse,
    YesNo,
    TrueFalseNotGiven,
    YesNoNotGiven,
    MultipleChoice,
    TableCompletion,
    SentenceCompletion,
    SummaryCompletion,
    NoteCompletion,
    MatchingHeadings,
    ShortAnswer,
    Unknown,
}

static GROUP_TYPES: phf::Map<&'static str, GroupType> = phf_map! {
    "true_false" => GroupType::TrueFalse,
    "yes_no" => GroupType::YesNo,
    "true_false_not_given" => GroupType::TrueFalseNotGiven,
    "yes_no_not_given" => GroupType::YesNoNotGiven,
    "multiple_choice" => GroupType::MultipleChoice,
    "table_completion" => GroupType::TableCompletion,
    "sentence_completion" => GroupType::SentenceCompletion,
    "summary_completion" => GroupType::SummaryCompletion,
    "note_completion" => GroupType::NoteCompletion,
    "matching_headings" => GroupType::MatchingHeadings,
    "short_answer" => GroupType::ShortAnswer,
};

impl GroupType {
    /// 从接口字符串解析题组类型，未知类型返回 `Unknown`
    pub fn parse(s: &str) -> Self {
        GROUP_TYPES
            .get(normalize_key(s).to_lowercase().as_str())
            .copied()
            .unwrap_or(GroupType::Unknown)
    }

    /// 是否为判断类题组
    pub fn is_boolean(self) -> bool {
        matches!(
            self,
            GroupType::TrueFalse
                | GroupType::YesNo
                | GroupType::TrueFalseNotGiven
                | GroupType::YesNoNotGiven
        )
    }
}

/// 题目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    TrueFalseNotGiven,
    YesNoNotGiven,
    MultipleChoice,
    ShortAnswer,
    FillInBlank,
    Unknown,
}

static QUESTION_TYPES: phf::Map<&'static str, QuestionType> = phf_map! {
    "TRUE_FALSE_NOT_GIVEN" => QuestionType::TrueFalseNotGiven,
    "YES_NO_NOT_GIVEN" => QuestionType::YesNoNotGiven,
    "MULTIPLE_CHOICE" => QuestionType::MultipleChoice,
    "SHORT_ANSWER" => QuestionType::ShortAnswer,
    "FILL_IN_BLANK" => QuestionType::FillInBlank,
};

impl QuestionType {
    /// 从接口字符串解析题目类型，未知类型返回 `Unknown`
    pub fn parse(s: &str) -> Self {
        QUESTION_TYPES
            .get(normalize_key(s).to_uppercase().as_str())
            .copied()
            .unwrap_or(QuestionType::Unknown)
    }

    /// 是否为判断类题目
    pub fn is_boolean(self) -> bool {
        matches!(
            self,
            QuestionType::TrueFalseNotGiven | QuestionType::YesNoNotGiven
        )
    }
}

/// 统一分隔符：`true-false`、`True False` 都视为 `true_false`
fn normalize_key(s: &str) -> String {
    s.trim().replace(['-', ' '], "_")
}

/// 选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    pub key: String,
    pub text: String,
}

impl From<&WireOption> for OptionItem {
    fn from(option: &WireOption) -> Self {
        match option {
            WireOption::Label(label) => Self {
                key: label.clone(),
                text: label.clone(),
            },
            WireOption::Keyed { key, text } => Self {
                key: key.clone(),
                text: text.clone(),
            },
        }
    }
}

/// 题目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    /// 题号（从1开始，试卷内唯一）
    pub order: u32,
    pub prompt_text: String,
    pub question_type: QuestionType,
    pub option_list: Vec<OptionItem>,
    pub correct_answer: String,
}

impl Question {
    /// 由快照题目构建，题号无效的题目返回 None
    pub fn from_item(item: &Item) -> Option<Self> {
        let order = item.number?;
        Some(Self {
            id: item.item_id.clone(),
            order,
            prompt_text: item.prompt.clone(),
            question_type: item
                .item_type
                .as_deref()
                .map(QuestionType::parse)
                .unwrap_or(QuestionType::Unknown),
            option_list: item.options.iter().map(OptionItem::from).collect(),
            correct_answer: item.answer.value.clone(),
        })
    }
}

/// 容器类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    Table,
    Other,
}

/// 表格容器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableContainer {
    pub kind: ContainerKind,
    pub columns: Vec<String>,
    /// 行 → 单元格 → 富文本节点
    pub rows: Vec<Vec<Vec<RichNode>>>,
}

impl From<&Container> for TableContainer {
    fn from(container: &Container) -> Self {
        let kind = if container.kind.trim().eq_ignore_ascii_case("table") {
            ContainerKind::Table
        } else {
            ContainerKind::Other
        };
        Self {
            kind,
            columns: container.columns.clone(),
            rows: container
                .rows
                .iter()
                .map(|row| row.cells.iter().map(|cell| cell.rich_nodes.clone()).collect())
                .collect(),
        }
    }
}

/// 题组
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionGroup {
    pub id: String,
    pub title: String,
    pub instructions: String,
    pub group_type: GroupType,
    pub content: Vec<RichNode>,
    pub container: Option<TableContainer>,
    pub options: Vec<OptionItem>,
    pub questions: Vec<Question>,
}

impl QuestionGroup {
    /// 第一道题的类型（题组分类时作为补充依据）
    pub fn first_question_type(&self) -> QuestionType {
        self.questions
            .first()
            .map(|q| q.question_type)
            .unwrap_or(QuestionType::Unknown)
    }
}

impl From<&Group> for QuestionGroup {
    fn from(group: &Group) -> Self {
        let questions: Vec<Question> = group
            .items
            .iter()
            .filter_map(|item| {
                let question = Question::from_item(item);
                if question.is_none() {
                    warn!(
                        "⚠️ 题组 {} 中题目 {} 缺少有效题号，已跳过",
                        group.group_id, item.item_id
                    );
                }
                question
            })
            .collect();
        let title = match &group.title {
            Some(title) if !title.trim().is_empty() => title.clone(),
            _ => derive_title(&questions),
        };
        let content = match &group.content {
            Some(GroupContent::Text(value)) if !value.is_empty() => vec![RichNode::Text {
                value: value.clone(),
            }],
            Some(GroupContent::Rich(nodes)) => nodes.clone(),
            _ => Vec::new(),
        };

        Self {
            id: group.group_id.clone(),
            title,
            instructions: group.instructions.clone(),
            group_type: GroupType::parse(&group.group_type),
            content,
            container: group.container.as_ref().map(TableContainer::from),
            options: group.options.iter().map(OptionItem::from).collect(),
            questions,
        }
    }
}

/// 根据题号范围生成题组标题
fn derive_title(questions: &[Question]) -> String {
    let first = questions.iter().map(|q| q.order).min();
    let last = questions.iter().map(|q| q.order).max();
    match (first, last) {
        (Some(first), Some(last)) if first == last => format!("Question {}", first),
        (Some(first), Some(last)) => format!("Questions {}-{}", first, last),
        _ => String::new(),
    }
}
