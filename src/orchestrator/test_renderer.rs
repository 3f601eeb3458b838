//! 单套试卷渲染器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责把一份完整的试卷快照转换为渲染树，是试卷级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **遍历篇章**：检查正文和题组列表是否存在（缺失时整体上抛）
//! 2. **正文重建**：从题目中提取答案区间，交给 `span_resolver` 和 `TextSegmentRenderer`
//! 3. **题组分发**：创建并复用 `GroupRenderDispatcher`
//! 4. **统计输出**：记录篇章/题组/高亮数量
//!
//! 渲染是纯函数：相同输入得到完全相同的输出，不做缓存

use crate::config::RenderOptions;
use crate::error::{AppResult, ContentError};
use crate::models::question::QuestionGroup;
use crate::models::registry::QuestionRegistry;
use crate::models::render::{PassageBody, PassageView, RenderTree};
use crate::models::snapshot::{Group, Passage, Test};
use crate::models::span::AnswerSpan;
use crate::services::{span_resolver, SlotTemplateEngine, TextSegmentRenderer};
use crate::workflow::{GroupCtx, GroupRenderDispatcher};
use tracing::{debug, info};

/// 试卷渲染器
pub struct TestRenderer {
    segment_renderer: TextSegmentRenderer,
    slot_engine: SlotTemplateEngine,
}

impl TestRenderer {
    /// 创建渲染器，插槽表达式无效时返回配置错误
    pub fn new(options: &RenderOptions) -> AppResult<Self> {
        Ok(Self {
            segment_renderer: TextSegmentRenderer::new(options),
            slot_engine: SlotTemplateEngine::new(options)?,
        })
    }

    /// 渲染整套试卷
    ///
    /// # 参数
    /// - `test`: 试卷快照
    /// - `registry`: 题号 → 题目（插槽可以引用其他篇章的题目）
    ///
    /// # 返回
    /// 渲染树；只有篇章正文或题组列表缺失时返回错误
    pub fn render(&self, test: &Test, registry: &QuestionRegistry) -> AppResult<RenderTree> {
        let dispatcher = GroupRenderDispatcher::new(&self.slot_engine);

        let mut passages = Vec::with_capacity(test.passages.len());
        for (index, passage) in test.passages.iter().enumerate() {
            let passage_index = index + 1;
            passages.push(self.render_passage(test, passage, passage_index, registry, &dispatcher)?);
        }

        info!(
            "✓ 试卷 {} 渲染完成: {} 个篇章, {} 个题组",
            test.id,
            passages.len(),
            passages.iter().map(|p| p.groups.len()).sum::<usize>()
        );

        Ok(RenderTree {
            test_id: test.id.clone(),
            title: test.title.clone(),
            passages,
        })
    }

    fn render_passage(
        &self,
        test: &Test,
        passage: &Passage,
        passage_index: usize,
        registry: &QuestionRegistry,
        dispatcher: &GroupRenderDispatcher<'_>,
    ) -> AppResult<PassageView> {
        let text = passage
            .text
            .as_deref()
            .ok_or_else(|| ContentError::PassageTextUnavailable {
                passage_index,
                title: passage.title.clone(),
            })?;
        let groups = passage
            .groups
            .as_ref()
            .ok_or_else(|| ContentError::GroupsUnavailable {
                passage_index,
                title: passage.title.clone(),
            })?;

        let spans = collect_spans(groups);
        debug!(
            "[试卷 {} 篇章 {}] 正文 {} 字符, 答案区间 {} 个",
            test.id,
            passage_index,
            text.chars().count(),
            spans.len()
        );

        let body = self.render_body(text, &spans);

        let groups = groups
            .iter()
            .map(|group| {
                let ctx = GroupCtx::new(test.id.clone(), passage_index, group.group_id.clone());
                dispatcher.render(&QuestionGroup::from(group), registry, &ctx)
            })
            .collect();

        Ok(PassageView {
            title: passage.title.clone(),
            body,
            groups,
        })
    }

    /// 重建篇章正文（复习视图）
    ///
    /// 没有答案区间时按行分块，否则输出带高亮的文本流
    pub fn render_body(&self, text: &str, spans: &[AnswerSpan]) -> PassageBody {
        if spans.is_empty() {
            PassageBody::Blocks(self.segment_renderer.render_blocks(text))
        } else {
            let segments = span_resolver::resolve(text, spans);
            PassageBody::Highlighted(self.segment_renderer.render_runs(&segments))
        }
    }
}

/// 从题目中提取答案区间（有效题号且同时带有起止位置的题目才算）
pub fn collect_spans(groups: &[Group]) -> Vec<AnswerSpan> {
    groups
        .iter()
        .flat_map(|group| group.items.iter())
        .filter_map(|item| {
            match (item.number, item.answer.start_index, item.answer.end_index) {
                (Some(number), Some(start), Some(end)) => Some(AnswerSpan::new(
                    start,
                    end,
                    number,
                    item.answer.value.clone(),
                )),
                _ => None,
            }
        })
        .collect()
}

/// 使用默认参数渲染试卷
pub fn render_test(test: &Test, registry: &QuestionRegistry) -> AppResult<RenderTree> {
    TestRenderer::new(&RenderOptions::default())?.render(test, registry)
}
