//! 答案区间消解 - 业务能力层
//!
//! 把无序、可能重叠的答案区间转换为覆盖整篇正文的有序、不相交片段

use crate::models::span::{AnswerSpan, Segment};
use tracing::debug;

/// 裁剪后的合法区间（字符下标）
#[derive(Debug, Clone, Copy)]
struct ClippedSpan<'a> {
    start: usize,
    end: usize,
    span: &'a AnswerSpan,
}

/// 消解答案区间
///
/// 1. 把 `start` / `end` 裁剪到 `[0, N]`，丢弃裁剪后为空或倒置的区间
/// 2. 按 `start` 升序稳定排序，`start` 相同时 `end` 小的在前
/// 3. 顺序扫描，只接受 `start >= last_accepted_end` 的区间（先到先得）
/// 4. 被接受区间之间的空隙输出为 `Plain`
///
/// 片段按顺序拼接后与原文完全一致
pub fn resolve(text: &str, spans: &[AnswerSpan]) -> Vec<Segment> {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    let mut clipped: Vec<ClippedSpan<'_>> = spans
        .iter()
        .filter_map(|span| clip(span, len))
        .collect();
    clipped.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));

    let mut segments = Vec::new();
    let mut last_accepted_end = 0usize;

    for candidate in clipped {
        if candidate.start < last_accepted_end {
            debug!(
                "丢弃重叠区间: 题号 {} [{}, {}) 与已接受区间结束位置 {} 冲突",
                candidate.span.question_number, candidate.start, candidate.end, last_accepted_end
            );
            continue;
        }

        if candidate.start > last_accepted_end {
            segments.push(Segment::Plain {
                text: slice(&chars, last_accepted_end, candidate.start),
            });
        }
        segments.push(Segment::Answer {
            text: slice(&chars, candidate.start, candidate.end),
            question_number: candidate.span.question_number,
            answer_value: candidate.span.answer_value.clone(),
        });
        last_accepted_end = candidate.end;
    }

    if last_accepted_end < len || segments.is_empty() {
        segments.push(Segment::Plain {
            text: slice(&chars, last_accepted_end, len),
        });
    }

    segments
}

/// 裁剪到 `[0, len]`，空区间返回 None
fn clip(span: &AnswerSpan, len: usize) -> Option<ClippedSpan<'_>> {
    let bound = |v: i64| -> usize { v.clamp(0, len as i64) as usize };
    let start = bound(span.start);
    let end = bound(span.end);

    if start >= end {
        debug!(
            "丢弃无效区间: 题号 {} 原始 [{}, {}) 裁剪后为空",
            span.question_number, span.start, span.end
        );
        return None;
    }

    Some(ClippedSpan { start, end, span })
}

fn slice(chars: &[char], start: usize, end: usize) -> String {
    chars[start..end].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: &str = "Paris is the capital of France. It has many museums.";

    fn concat(segments: &[Segment]) -> String {
        segments.iter().map(Segment::text).collect()
    }

    #[test]
    fn test_empty_spans_single_plain() {
        let segments = resolve(PARIS, &[]);
        assert_eq!(
            segments,
            vec![Segment::Plain {
                text: PARIS.to_string()
            }]
        );
    }

    #[test]
    fn test_empty_text_single_plain() {
        let segments = resolve("", &[AnswerSpan::new(0, 3, 1, "x")]);
        assert_eq!(
            segments,
            vec![Segment::Plain {
                text: String::new()
            }]
        );
    }

    #[test]
    fn test_overlap_first_wins() {
        let spans = vec![
            AnswerSpan::new(0, 5, 1, "Paris"),
            AnswerSpan::new(3, 8, 2, "is th"),
        ];
        let segments = resolve(PARIS, &spans);

        assert_eq!(
            segments,
            vec![
                Segment::Answer {
                    text: "Paris".to_string(),
                    question_number: 1,
                    answer_value: "Paris".to_string(),
                },
                Segment::Plain {
                    text: " is the capital of France. It has many museums.".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_unsorted_input_and_adjacent_spans() {
        // 输入乱序，且两个区间首尾相接（start == last_end 允许）
        let spans = vec![
            AnswerSpan::new(24, 30, 3, "France"),
            AnswerSpan::new(6, 8, 2, "is"),
            AnswerSpan::new(0, 6, 1, "Paris "),
        ];
        let segments = resolve(PARIS, &spans);

        let answers: Vec<u32> = segments
            .iter()
            .filter_map(|s| match s {
                Segment::Answer {
                    question_number, ..
                } => Some(*question_number),
                _ => None,
            })
            .collect();
        assert_eq!(answers, vec![1, 2, 3]);
        assert_eq!(concat(&segments), PARIS);
    }

    #[test]
    fn test_tie_break_shorter_end_first() {
        let spans = vec![
            AnswerSpan::new(0, 12, 2, "Paris is the"),
            AnswerSpan::new(0, 5, 1, "Paris"),
        ];
        let segments = resolve(PARIS, &spans);
        assert!(matches!(
            &segments[0],
            Segment::Answer { question_number: 1, text, .. } if text == "Paris"
        ));
        assert_eq!(concat(&segments), PARIS);
    }

    #[test]
    fn test_zero_width_dropped() {
        let segments = resolve(PARIS, &[AnswerSpan::new(4, 4, 1, "")]);
        assert_eq!(segments.len(), 1);
        assert!(matches!(&segments[0], Segment::Plain { .. }));
    }

    #[test]
    fn test_clip_end_past_text() {
        let text = "short text";
        let segments = resolve(text, &[AnswerSpan::new(6, 400, 1, "text")]);
        assert_eq!(
            segments,
            vec![
                Segment::Plain {
                    text: "short ".to_string()
                },
                Segment::Answer {
                    text: "text".to_string(),
                    question_number: 1,
                    answer_value: "text".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_out_of_range_and_inverted_dropped() {
        let spans = vec![
            AnswerSpan::new(100, 120, 1, "x"),
            AnswerSpan::new(-10, -2, 2, "y"),
            AnswerSpan::new(9, 3, 3, "z"),
        ];
        let segments = resolve(PARIS, &spans);
        assert_eq!(
            segments,
            vec![Segment::Plain {
                text: PARIS.to_string()
            }]
        );
    }

    #[test]
    fn test_negative_start_clipped() {
        let segments = resolve(PARIS, &[AnswerSpan::new(-3, 5, 1, "Paris")]);
        assert!(matches!(&segments[0], Segment::Answer { text, .. } if text == "Paris"));
        assert_eq!(concat(&segments), PARIS);
    }

    #[test]
    fn test_multibyte_chars_by_char_index() {
        let text = "北京是中国的首都。";
        let segments = resolve(text, &[AnswerSpan::new(0, 2, 1, "北京")]);
        assert!(matches!(&segments[0], Segment::Answer { text, .. } if text == "北京"));
        assert_eq!(concat(&segments), text);
    }

    #[test]
    fn test_round_trip_many_overlaps() {
        // 大量交错区间：拼接结果必须等于原文，且 Answer 片段互不重叠
        let len = PARIS.chars().count() as i64;
        let spans: Vec<AnswerSpan> = (0..40)
            .map(|i| {
                let start = (i * 7) % (len + 5) - 2;
                let end = start + (i % 9);
                AnswerSpan::new(start, end, i as u32, format!("a{}", i))
            })
            .collect();

        let segments = resolve(PARIS, &spans);
        assert_eq!(concat(&segments), PARIS);
        assert!(segments.iter().all(|s| !s.text().is_empty()));
        assert_eq!(resolve(PARIS, &spans), segments);
    }
}
