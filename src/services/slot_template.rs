//! 插槽模板解析 - 业务能力层
//!
//! 把富文本中的 `SlotRef` 替换为对应题目的答案

use crate::config::RenderOptions;
use crate::error::{AppResult, ConfigError};
use crate::models::registry::QuestionRegistry;
use crate::models::render::RenderedNode;
use crate::models::snapshot::RichNode;
use regex::Regex;
use tracing::debug;

/// 插槽模板引擎
#[derive(Debug, Clone)]
pub struct SlotTemplateEngine {
    slot_pattern: Regex,
    placeholder: String,
}

impl SlotTemplateEngine {
    /// 创建模板引擎
    ///
    /// 插槽表达式必须至少包含一个捕获组（题号数字）
    pub fn new(options: &RenderOptions) -> AppResult<Self> {
        let slot_pattern =
            Regex::new(&options.slot_pattern).map_err(|source| ConfigError::InvalidSlotPattern {
                pattern: options.slot_pattern.clone(),
                source,
            })?;
        if slot_pattern.captures_len() < 2 {
            return Err(ConfigError::MissingCaptureGroup {
                pattern: options.slot_pattern.clone(),
            }
            .into());
        }

        Ok(Self {
            slot_pattern,
            placeholder: options.slot_placeholder.clone(),
        })
    }

    /// 从插槽 id 中提取题号
    ///
    /// 取最右边的一次匹配：`"G3-Q7"` → 7，`"Q12Q3"` → 3。
    /// 数字溢出或没有匹配时返回 None
    pub fn extract_order(&self, slot_id: &str) -> Option<u32> {
        self.slot_pattern
            .captures_iter(slot_id)
            .last()
            .and_then(|caps| caps.get(1))
            .and_then(|digits| digits.as_str().parse().ok())
    }

    /// 渲染单个节点，无法解析的插槽输出占位符
    pub fn render_node(&self, node: &RichNode, registry: &QuestionRegistry) -> RenderedNode {
        match node {
            RichNode::Text { value } => RenderedNode::Text {
                value: value.clone(),
            },
            RichNode::SlotRef { slot_id } => {
                match self.extract_order(slot_id).and_then(|order| registry.get(order)) {
                    Some(question) => RenderedNode::Answer {
                        order: question.order,
                        correct_answer: question.correct_answer.clone(),
                    },
                    None => {
                        debug!("插槽 {} 未找到对应题目，使用占位符", slot_id);
                        RenderedNode::Placeholder {
                            slot_id: slot_id.clone(),
                            label: self.placeholder.clone(),
                        }
                    }
                }
            }
        }
    }

    /// 按顺序渲染节点列表
    pub fn render(&self, nodes: &[RichNode], registry: &QuestionRegistry) -> Vec<RenderedNode> {
        nodes
            .iter()
            .map(|node| self.render_node(node, registry))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{Question, QuestionType};

    fn question(order: u32, answer: &str) -> Question {
        Question {
            id: format!("q{}", order),
            order,
            prompt_text: String::new(),
            question_type: QuestionType::Unknown,
            option_list: Vec::new(),
            correct_answer: answer.to_string(),
        }
    }

    fn engine() -> SlotTemplateEngine {
        SlotTemplateEngine::new(&RenderOptions::default()).unwrap()
    }

    #[test]
    fn test_extract_order_rightmost() {
        let engine = engine();
        assert_eq!(engine.extract_order("G3-Q7"), Some(7));
        assert_eq!(engine.extract_order("Q12Q3"), Some(3));
        assert_eq!(engine.extract_order("slot-without-number"), None);
        assert_eq!(engine.extract_order("Q99999999999"), None);
    }

    #[test]
    fn test_extract_order_ascii_digits_only() {
        // 阿拉伯-印度数字不构成题号，取前面的 Q7
        let engine = engine();
        assert_eq!(engine.extract_order("Q7-Q١"), Some(7));
        assert_eq!(engine.extract_order("Q١٢"), None);
    }

    #[test]
    fn test_render_resolved_and_placeholder() {
        let engine = engine();
        let registry: QuestionRegistry = vec![question(7, "1889")].into_iter().collect();

        let nodes = vec![
            RichNode::Text {
                value: "Built in ".to_string(),
            },
            RichNode::SlotRef {
                slot_id: "G3-Q7".to_string(),
            },
            RichNode::SlotRef {
                slot_id: "G3-Q8".to_string(),
            },
        ];

        assert_eq!(
            engine.render(&nodes, &registry),
            vec![
                RenderedNode::Text {
                    value: "Built in ".to_string()
                },
                RenderedNode::Answer {
                    order: 7,
                    correct_answer: "1889".to_string()
                },
                RenderedNode::Placeholder {
                    slot_id: "G3-Q8".to_string(),
                    label: "______".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let options = RenderOptions {
            slot_pattern: "Q(".to_string(),
            ..RenderOptions::default()
        };
        assert!(SlotTemplateEngine::new(&options).is_err());

        let options = RenderOptions {
            slot_pattern: r"Q\d+".to_string(),
            ..RenderOptions::default()
        };
        assert!(SlotTemplateEngine::new(&options).is_err());
    }
}
