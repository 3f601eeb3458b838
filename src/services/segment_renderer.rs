//! 正文片段渲染 - 业务能力层
//!
//! 把规范片段（或没有答案区间的原文）转换为展示用的文本块

use crate::config::RenderOptions;
use crate::models::render::{TextBlock, TextRun};
use crate::models::span::Segment;

/// 片段渲染器
pub struct TextSegmentRenderer {
    heading_max_chars: usize,
    terminators: Vec<char>,
}

impl TextSegmentRenderer {
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            heading_max_chars: options.heading_max_chars,
            terminators: options.heading_terminators.chars().collect(),
        }
    }

    /// 无答案区间时按行分块
    ///
    /// 丢弃空行；短于阈值且不以终止符结尾的行视为标题，其余为段落
    pub fn render_blocks(&self, text: &str) -> Vec<TextBlock> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                if self.is_heading(line) {
                    TextBlock::Heading(line.to_string())
                } else {
                    TextBlock::Paragraph(line.to_string())
                }
            })
            .collect()
    }

    /// 有答案区间时输出普通段与高亮段交错的文本流
    pub fn render_runs(&self, segments: &[Segment]) -> Vec<TextRun> {
        segments
            .iter()
            .map(|segment| match segment {
                Segment::Plain { text } => TextRun::Plain { text: text.clone() },
                Segment::Answer {
                    text,
                    question_number,
                    answer_value,
                } => TextRun::Highlight {
                    text: text.clone(),
                    question_number: *question_number,
                    answer_value: answer_value.clone(),
                },
            })
            .collect()
    }

    fn is_heading(&self, line: &str) -> bool {
        let short = line.chars().count() < self.heading_max_chars;
        let terminated = line
            .chars()
            .last()
            .map(|c| self.terminators.contains(&c))
            .unwrap_or(false);
        short && !terminated
    }
}

impl Default for TextSegmentRenderer {
    fn default() -> Self {
        Self::new(&RenderOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_and_paragraph() {
        let renderer = TextSegmentRenderer::default();
        let text = "The History of Paris\n\n   \nParis is the capital of France.\nA short line,\nMuseums";

        assert_eq!(
            renderer.render_blocks(text),
            vec![
                TextBlock::Heading("The History of Paris".to_string()),
                TextBlock::Paragraph("Paris is the capital of France.".to_string()),
                TextBlock::Paragraph("A short line,".to_string()),
                TextBlock::Heading("Museums".to_string()),
            ]
        );
    }

    #[test]
    fn test_long_line_is_paragraph() {
        let renderer = TextSegmentRenderer::default();
        let line = "word ".repeat(20);
        let blocks = renderer.render_blocks(&line);
        // 去掉末尾空格后 99 个字符，超过阈值
        assert_eq!(blocks, vec![TextBlock::Paragraph(line.trim().to_string())]);
    }

    #[test]
    fn test_empty_text_no_blocks() {
        let renderer = TextSegmentRenderer::default();
        assert!(renderer.render_blocks("\n\n").is_empty());
    }

    #[test]
    fn test_runs_keep_metadata() {
        let renderer = TextSegmentRenderer::default();
        let runs = renderer.render_runs(&[
            Segment::Answer {
                text: "Paris".to_string(),
                question_number: 1,
                answer_value: "Paris".to_string(),
            },
            Segment::Plain {
                text: " is big.".to_string(),
            },
        ]);

        assert_eq!(
            runs,
            vec![
                TextRun::Highlight {
                    text: "Paris".to_string(),
                    question_number: 1,
                    answer_value: "Paris".to_string(),
                },
                TextRun::Plain {
                    text: " is big.".to_string()
                },
            ]
        );
    }
}
