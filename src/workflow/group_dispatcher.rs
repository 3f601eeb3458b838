//! 题组渲染分发 - 流程层
//!
//! 核心职责：先对题组做一次分类，再按分类结果选择渲染策略
//!
//! 分类规则（按优先级）：
//! 1. 判断题：题组类型为 true_false / yes_no / *_not_given，或首题类型为 *_NOT_GIVEN
//! 2. 选择题：题组类型或首题类型为 multiple_choice
//! 3. 表格：题组类型为 table_completion 且容器是表格
//! 4. 其他：只读展示题号和正确答案（兜底）

use crate::models::question::{
    ContainerKind, GroupType, OptionItem, Question, QuestionGroup, QuestionType, TableContainer,
};
use crate::models::registry::QuestionRegistry;
use crate::models::render::{
    ChoiceLayout, ChoiceQuestionView, FreeTextView, GroupBody, GroupView, OptionView,
};
use crate::services::answer_matcher::{is_equivalent_boolean, is_equivalent_choice};
use crate::services::SlotTemplateEngine;
use crate::workflow::group_ctx::GroupCtx;
use tracing::{debug, warn};

/// 渲染策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy {
    BooleanChoice,
    MultipleChoice(ChoiceLayout),
    Table,
    FreeText,
}

/// 对题组分类
pub fn classify(group: &QuestionGroup) -> RenderStrategy {
    let first_type = group.first_question_type();

    if group.group_type.is_boolean() || first_type.is_boolean() {
        return RenderStrategy::BooleanChoice;
    }

    if group.group_type == GroupType::MultipleChoice || first_type == QuestionType::MultipleChoice {
        return RenderStrategy::MultipleChoice(choice_layout(group));
    }

    let has_table = matches!(
        &group.container,
        Some(TableContainer {
            kind: ContainerKind::Table,
            ..
        })
    );
    if group.group_type == GroupType::TableCompletion && has_table {
        return RenderStrategy::Table;
    }

    RenderStrategy::FreeText
}

/// 共用选项池：题组有选项，且至少一道题的题干为空或以 "Question" 开头
fn choice_layout(group: &QuestionGroup) -> ChoiceLayout {
    let placeholder_prompt = group
        .questions
        .iter()
        .any(|q| q.prompt_text.is_empty() || q.prompt_text.starts_with("Question"));

    if !group.options.is_empty() && placeholder_prompt {
        ChoiceLayout::ChooseFromList
    } else {
        ChoiceLayout::PerQuestion
    }
}

const TRUE_FALSE: &[&str] = &["TRUE", "FALSE"];
const YES_NO: &[&str] = &["YES", "NO"];
const TRUE_FALSE_NOT_GIVEN: &[&str] = &["TRUE", "FALSE", "NOT GIVEN"];
const YES_NO_NOT_GIVEN: &[&str] = &["YES", "NO", "NOT GIVEN"];

/// 判断题的默认选项
fn default_boolean_labels(group_type: GroupType, question_type: QuestionType) -> &'static [&'static str] {
    match (group_type, question_type) {
        (GroupType::TrueFalse, _) => TRUE_FALSE,
        (GroupType::YesNo, _) => YES_NO,
        (GroupType::YesNoNotGiven, _) | (_, QuestionType::YesNoNotGiven) => YES_NO_NOT_GIVEN,
        _ => TRUE_FALSE_NOT_GIVEN,
    }
}

/// 题组渲染分发器
pub struct GroupRenderDispatcher<'a> {
    slot_engine: &'a SlotTemplateEngine,
}

impl<'a> GroupRenderDispatcher<'a> {
    pub fn new(slot_engine: &'a SlotTemplateEngine) -> Self {
        Self { slot_engine }
    }

    /// 渲染单个题组
    ///
    /// 任何题组都不会导致失败，无法识别的结构统一走兜底渲染
    pub fn render(&self, group: &QuestionGroup, registry: &QuestionRegistry, ctx: &GroupCtx) -> GroupView {
        let strategy = classify(group);
        debug!("{} 分类结果: {:?}", ctx, strategy);

        if strategy == RenderStrategy::FreeText && group.group_type == GroupType::TableCompletion {
            warn!("{} ⚠️ 表格填空题缺少表格容器，按普通题目展示", ctx);
        }

        let body = match strategy {
            RenderStrategy::BooleanChoice => self.render_boolean(group),
            RenderStrategy::MultipleChoice(layout) => self.render_multiple_choice(group, layout),
            RenderStrategy::Table => self.render_table(group, registry),
            RenderStrategy::FreeText => self.render_free_text(group),
        };

        GroupView {
            group_id: group.id.clone(),
            title: group.title.clone(),
            instructions: group.instructions.clone(),
            content: self.slot_engine.render(&group.content, registry),
            body,
        }
    }

    fn render_boolean(&self, group: &QuestionGroup) -> GroupBody {
        let questions = group
            .questions
            .iter()
            .map(|question| {
                let options = self.boolean_options(group, question);
                ChoiceQuestionView {
                    order: question.order,
                    prompt: question.prompt_text.clone(),
                    options: options
                        .iter()
                        .map(|option| {
                            OptionView::new(
                                option,
                                is_equivalent_boolean(&question.correct_answer, &option.key),
                            )
                        })
                        .collect(),
                }
            })
            .collect();

        GroupBody::BooleanChoice { questions }
    }

    /// 选项来源：题组选项 → 题目自带选项 → 按类型生成的默认选项
    fn boolean_options(&self, group: &QuestionGroup, question: &Question) -> Vec<OptionItem> {
        if !group.options.is_empty() {
            return group.options.clone();
        }
        if !question.option_list.is_empty() {
            return question.option_list.clone();
        }
        default_boolean_labels(group.group_type, question.question_type)
            .iter()
            .map(|label| OptionItem {
                key: label.to_string(),
                text: label.to_string(),
            })
            .collect()
    }

    fn render_multiple_choice(&self, group: &QuestionGroup, layout: ChoiceLayout) -> GroupBody {
        let questions = group
            .questions
            .iter()
            .map(|question| {
                let options = match layout {
                    ChoiceLayout::ChooseFromList => &group.options,
                    ChoiceLayout::PerQuestion if question.option_list.is_empty() => &group.options,
                    ChoiceLayout::PerQuestion => &question.option_list,
                };
                ChoiceQuestionView {
                    order: question.order,
                    prompt: question.prompt_text.clone(),
                    options: options
                        .iter()
                        .map(|option| {
                            OptionView::new(
                                option,
                                is_equivalent_choice(&question.correct_answer, &option.key),
                            )
                        })
                        .collect(),
                }
            })
            .collect();

        let pool = match layout {
            ChoiceLayout::ChooseFromList => group.options.clone(),
            ChoiceLayout::PerQuestion => Vec::new(),
        };

        GroupBody::MultipleChoice {
            layout,
            pool,
            questions,
        }
    }

    fn render_table(&self, group: &QuestionGroup, registry: &QuestionRegistry) -> GroupBody {
        let Some(table) = &group.container else {
            return self.render_free_text(group);
        };

        GroupBody::Table {
            columns: table.columns.clone(),
            rows: table
                .rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| self.slot_engine.render(cell, registry))
                        .collect()
                })
                .collect(),
        }
    }

    fn render_free_text(&self, group: &QuestionGroup) -> GroupBody {
        let questions = group
            .questions
            .iter()
            .map(|question| FreeTextView {
                order: question.order,
                label: if question.prompt_text.trim().is_empty() {
                    format!("Question {}", question.order)
                } else {
                    question.prompt_text.clone()
                },
                correct_answer: question.correct_answer.clone(),
            })
            .collect();

        GroupBody::FreeText { questions }
    }
}
