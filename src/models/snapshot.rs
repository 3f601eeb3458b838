//! 试卷快照（外部题库接口返回的原始结构）
//!
//! 字段名与接口保持一致，只做反序列化，不做任何业务判断

use serde::{Deserialize, Serialize};

/// 试卷
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Test {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub passages: Vec<Passage>,
}

/// 篇章
///
/// `text` 与 `groups` 缺失时整篇无法渲染，因此保留 `Option`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub groups: Option<Vec<Group>>,
}

/// 题组
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub group_id: String,
    #[serde(rename = "type", default)]
    pub group_type: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub content: Option<GroupContent>,
    #[serde(default)]
    pub container: Option<Container>,
    #[serde(default)]
    pub options: Vec<WireOption>,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// 题组正文：纯文本或富文本节点列表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupContent {
    Text(String),
    Rich(Vec<RichNode>),
}

/// 富文本节点
///
/// `SlotRef` 的 `slot_id` 末尾的 `Q<数字>` 指向题号
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichNode {
    Text {
        value: String,
    },
    #[serde(rename = "slot")]
    SlotRef {
        #[serde(alias = "slotId")]
        slot_id: String,
    },
}

/// 题组容器（目前只有表格会被特殊渲染）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<ContainerRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerRow {
    #[serde(default)]
    pub cells: Vec<ContainerCell>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerCell {
    #[serde(default, alias = "richNodes")]
    pub rich_nodes: Vec<RichNode>,
}

/// 选项：接口里既有纯字符串（"TRUE"），也有带 key 的对象（{"key": "A", "text": ...}）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireOption {
    Label(String),
    Keyed {
        key: String,
        #[serde(default)]
        text: String,
    },
}

/// 题目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub item_id: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(rename = "type", default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub options: Vec<WireOption>,
    #[serde(default)]
    pub answer: ItemAnswer,
    /// 题号；缺失、负数或无法解析时为 None，该题在渲染时被跳过
    #[serde(default, deserialize_with = "deserialize_number")]
    pub number: Option<u32>,
}

/// 答案及其在篇章中的位置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemAnswer {
    #[serde(default, deserialize_with = "deserialize_answer_value")]
    pub value: String,
    #[serde(default)]
    pub start_index: Option<i64>,
    #[serde(default)]
    pub end_index: Option<i64>,
}

// 答案可能是字符串，也可能是数字（年份、数量）或布尔值
fn deserialize_answer_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct AnswerVisitor;

    impl<'de> Visitor<'de> for AnswerVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number or boolean answer")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(AnswerVisitor)
}

// 题号允许是整数或数字字符串，其他情况一律视为无效（None），不让整份快照解析失败
fn deserialize_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct NumberVisitor;

    impl<'de> Visitor<'de> for NumberVisitor {
        type Value = Option<u32>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a question number")
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(u32::try_from(value).ok())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(u32::try_from(value).ok())
        }

        fn visit_f64<E>(self, _value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.trim().parse().ok())
        }

        fn visit_bool<E>(self, _value: bool) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(NumberVisitor)
}
