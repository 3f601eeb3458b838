//! 答案匹配 - 业务能力层
//!
//! 只负责"正确答案与选项是否等价"的判断，无状态

/// 判断类选项允许按首字母匹配的字母集合
const BOOLEAN_INITIALS: [char; 4] = ['T', 'F', 'Y', 'N'];

/// 规范化答案：去除首尾空白并转为大写
pub fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}

/// 判断题答案与选项是否等价
///
/// 规范化后完全相等即匹配；否则只要两者首字母相同且属于 T/F/Y/N，
/// 也视为匹配（如 "True" 与 "T"、"Not Given" 与 "N"）。
///
/// 上游数据的大小写和拼写并不统一，所以这里故意放宽。
/// 副作用是 "NOT GIVEN" 也会与 "NO" 匹配，非英文标签则无法匹配。
pub fn is_equivalent_boolean(correct: &str, option_label: &str) -> bool {
    let correct = normalize(correct);
    let label = normalize(option_label);

    if correct == label {
        return true;
    }

    match (correct.chars().next(), label.chars().next()) {
        (Some(a), Some(b)) => a == b && BOOLEAN_INITIALS.contains(&a),
        _ => false,
    }
}

/// 选择题答案与选项 key 是否等价
///
/// 只做规范化后的精确比较，不做首字母等模糊匹配
pub fn is_equivalent_choice(correct: &str, option_key: &str) -> bool {
    normalize(correct) == normalize(option_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  not given "), "NOT GIVEN");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_boolean_first_letter() {
        assert!(is_equivalent_boolean("True", "T"));
        assert!(is_equivalent_boolean("NOT GIVEN", "N"));
        assert!(is_equivalent_boolean("yes", "Y"));
        assert!(is_equivalent_boolean(" false ", "FALSE"));
    }

    #[test]
    fn test_boolean_mismatch() {
        assert!(!is_equivalent_boolean("True", "False"));
        assert!(!is_equivalent_boolean("Yes", "No"));
        // A 不在 T/F/Y/N 中，首字母相同也不匹配
        assert!(!is_equivalent_boolean("Agree", "Always"));
        assert!(!is_equivalent_boolean("", "TRUE"));
    }

    #[test]
    fn test_boolean_loose_not_given() {
        // 首字母规则下 NOT GIVEN 与 NO 等价
        assert!(is_equivalent_boolean("NOT GIVEN", "NO"));
    }

    #[test]
    fn test_choice_exact_only() {
        assert!(is_equivalent_choice("b", " B"));
        assert!(!is_equivalent_choice("B", "BC"));
        assert!(!is_equivalent_choice("True", "T"));
    }
}
