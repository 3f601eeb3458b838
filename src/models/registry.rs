use crate::models::question::Question;
use crate::models::snapshot::Test;
use std::collections::BTreeMap;
use tracing::warn;

/// 题目注册表：题号 → 题目
///
/// 使用有序映射，保证同一输入的遍历顺序稳定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionRegistry {
    questions: BTreeMap<u32, Question>,
}

impl QuestionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从整套试卷构建注册表，重复题号保留第一次出现的题目
    pub fn from_test(test: &Test) -> Self {
        let mut registry = Self::new();
        let items = test
            .passages
            .iter()
            .filter_map(|passage| passage.groups.as_ref())
            .flatten()
            .flat_map(|group| group.items.iter());

        for item in items {
            let Some(question) = Question::from_item(item) else {
                warn!(
                    "⚠️ 试卷 {} 中题目 {} 缺少有效题号，未加入注册表",
                    test.id, item.item_id
                );
                continue;
            };
            let order = question.order;
            if !registry.insert(question) {
                warn!(
                    "⚠️ 试卷 {} 中题号 {} 重复，忽略题目 {}",
                    test.id, order, item.item_id
                );
            }
        }
        registry
    }

    /// 插入题目，题号已存在时返回 false
    pub fn insert(&mut self, question: Question) -> bool {
        if self.questions.contains_key(&question.order) {
            return false;
        }
        self.questions.insert(question.order, question);
        true
    }

    pub fn get(&self, order: u32) -> Option<&Question> {
        self.questions.get(&order)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl FromIterator<Question> for QuestionRegistry {
    fn from_iter<I: IntoIterator<Item = Question>>(iter: I) -> Self {
        let mut registry = Self::new();
        for question in iter {
            registry.insert(question);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_test_keeps_first_and_skips_invalid() {
        let test: Test = serde_json::from_value(json!({
            "id": "t1",
            "passages": [{
                "text": "x",
                "groups": [{
                    "group_id": "g1",
                    "items": [
                        {"item_id": "first", "number": 1, "answer": {"value": "A"}},
                        {"item_id": "dup", "number": 1, "answer": {"value": "B"}},
                        {"item_id": "neg", "number": -2, "answer": {"value": "C"}},
                        {"item_id": "year", "number": 2, "answer": {"value": 1889}}
                    ]
                }]
            }]
        }))
        .unwrap();

        let registry = QuestionRegistry::from_test(&test);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(1).unwrap().id, "first");
        assert_eq!(registry.get(2).unwrap().correct_answer, "1889");
    }

    #[test]
    fn test_empty_registry() {
        let registry = QuestionRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get(1).is_none());

        let registry: QuestionRegistry = Vec::<Question>::new().into_iter().collect();
        assert!(registry.is_empty());
    }
}
