// ==========================================
// 对象构造器 - Matching Core 纯函数库
// ==========================================
// 职责: 数值前缀解析、区间拆分、容差判定、单参数判据
// 红线: 无状态、无副作用、无 I/O 操作；解析失败只导致判据不满足，不报错
// ==========================================

use crate::domain::SystemObject;

/// 单参数判据的判定分支
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriterionKind {
    /// 用户值缺失或为空，不参与过滤
    Unset,
    /// 对象没有该特性
    MissingCharacteristic,
    /// 对象值为区间，判定包含关系
    Range,
    /// 对象值为数值，判定容差
    Tolerance,
    /// 文本精确比较
    Exact,
}

/// 单参数判据结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriterionOutcome {
    pub matched: bool,
    pub kind: CriterionKind,
}

impl CriterionOutcome {
    fn new(matched: bool, kind: CriterionKind) -> Self {
        Self { matched, kind }
    }
}

// ==========================================
// MatchingCore - 纯函数工具类
// ==========================================
pub struct MatchingCore;

impl MatchingCore {
    /// 解析字符串开头的数值前缀
    ///
    /// # 规则
    /// - 跳过前导空白
    /// - 可选符号、整数部分、小数部分、指数部分
    /// - 至少需要一位数字，否则返回 None
    /// - 前缀之后的内容忽略（"0.5 - 0.9" → 0.5，"1,5" → 1）
    ///
    /// # 示例
    /// ```
    /// use object_constructor::engine::MatchingCore;
    /// assert_eq!(MatchingCore::parse_leading_float("  -30 - 45"), Some(-30.0));
    /// assert_eq!(MatchingCore::parse_leading_float("2.75abc"), Some(2.75));
    /// assert_eq!(MatchingCore::parse_leading_float("до 60"), None);
    /// ```
    pub fn parse_leading_float(input: &str) -> Option<f64> {
        let s = input.trim_start();
        let bytes = s.as_bytes();
        let len = bytes.len();
        let mut end = 0;

        if end < len && (bytes[end] == b'+' || bytes[end] == b'-') {
            end += 1;
        }

        if s[end..].starts_with("Infinity") {
            return Some(if bytes[0] == b'-' {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            });
        }

        let int_start = end;
        while end < len && bytes[end].is_ascii_digit() {
            end += 1;
        }
        let mut digits = end - int_start;

        if end < len && bytes[end] == b'.' {
            let frac_start = end + 1;
            let mut frac_end = frac_start;
            while frac_end < len && bytes[frac_end].is_ascii_digit() {
                frac_end += 1;
            }
            let frac_digits = frac_end - frac_start;
            if digits > 0 || frac_digits > 0 {
                end = frac_end;
                digits += frac_digits;
            }
        }

        if digits == 0 {
            return None;
        }

        if end < len && (bytes[end] == b'e' || bytes[end] == b'E') {
            let mut exp_end = end + 1;
            if exp_end < len && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
                exp_end += 1;
            }
            let exp_digits_start = exp_end;
            while exp_end < len && bytes[exp_end].is_ascii_digit() {
                exp_end += 1;
            }
            if exp_end > exp_digits_start {
                end = exp_end;
            }
        }

        s[..end].parse::<f64>().ok()
    }

    /// 定位区间分隔符 `-` 的字节位置
    ///
    /// # 规则
    /// 1. 前导符号不是分隔符（"-30 - 45" 中第一个 `-` 是负号）
    /// 2. 优先取两侧任一侧有空白的 `-`
    /// 3. 否则取第一个不属于指数（"1e-5"）的 `-`
    /// 4. 没有分隔符 → None（按标量处理，"-5" 是 -5）
    pub fn find_range_separator(value: &str) -> Option<usize> {
        let bytes = value.as_bytes();
        let lead = value.len() - value.trim_start().len();

        let candidates: Vec<usize> = bytes
            .iter()
            .enumerate()
            .filter(|(i, b)| **b == b'-' && *i > lead)
            .map(|(i, _)| i)
            .collect();

        let spaced = candidates.iter().copied().find(|&i| {
            bytes[i - 1].is_ascii_whitespace()
                || bytes.get(i + 1).map_or(false, |b| b.is_ascii_whitespace())
        });
        if spaced.is_some() {
            return spaced;
        }

        candidates.into_iter().find(|&i| {
            let exponent = i >= 2
                && matches!(bytes[i - 1], b'e' | b'E')
                && (bytes[i - 2].is_ascii_digit() || bytes[i - 2] == b'.');
            !exponent
        })
    }

    /// 拆分区间字符串为 (下界, 上界) 文本，已去除两侧空白
    pub fn split_range(value: &str) -> Option<(&str, &str)> {
        let idx = Self::find_range_separator(value)?;
        Some((value[..idx].trim(), value[idx + 1..].trim()))
    }

    /// 判定数值是否落在区间内（两端闭区间）
    ///
    /// 非区间或边界无法解析 → false
    pub fn is_value_in_range(range: &str, value: f64) -> bool {
        match Self::split_range(range) {
            Some((min_str, max_str)) => Self::is_within_bounds(min_str, max_str, value),
            None => false,
        }
    }

    fn is_within_bounds(min_str: &str, max_str: &str, value: f64) -> bool {
        match (
            Self::parse_leading_float(min_str),
            Self::parse_leading_float(max_str),
        ) {
            (Some(min), Some(max)) => value >= min && value <= max,
            _ => false,
        }
    }

    /// 容差判定
    ///
    /// # 规则
    /// - |object_value - target| <= ratio × object_value
    /// - 容差基数带符号：object_value 为负时上界为负，任何目标都不满足
    pub fn within_tolerance(object_value: f64, target: f64, ratio: f64) -> bool {
        let tolerance = object_value * ratio;
        (object_value - target).abs() <= tolerance
    }

    /// 判定对象是否满足某个参数的判据
    ///
    /// # 规则
    /// 1. 用户值缺失或为空 → 满足 (Unset)
    /// 2. 对象无该特性 → 不满足 (MissingCharacteristic)
    /// 3. 对象值为区间 → 目标为数值且落在区间内 (Range)
    /// 4. 目标与对象值均为数值 → 容差判定 (Tolerance)
    /// 5. 其余 → 文本精确比较，区分大小写 (Exact)
    pub fn evaluate_criterion(
        object: &SystemObject,
        parameter_id: &str,
        user_value: Option<&str>,
        tolerance_ratio: f64,
    ) -> CriterionOutcome {
        let user_value = match user_value {
            Some(v) if !v.is_empty() => v,
            _ => return CriterionOutcome::new(true, CriterionKind::Unset),
        };

        let characteristic = match object.characteristic(parameter_id) {
            Some(c) => c,
            None => return CriterionOutcome::new(false, CriterionKind::MissingCharacteristic),
        };

        let object_value = characteristic.value.to_string();
        let target = Self::parse_leading_float(user_value);

        if let Some((min_str, max_str)) = Self::split_range(&object_value) {
            let matched = target
                .map(|t| Self::is_within_bounds(min_str, max_str, t))
                .unwrap_or(false);
            return CriterionOutcome::new(matched, CriterionKind::Range);
        }

        if let Some(t) = target {
            if let Some(v) = Self::parse_leading_float(&object_value) {
                return CriterionOutcome::new(
                    Self::within_tolerance(v, t, tolerance_ratio),
                    CriterionKind::Tolerance,
                );
            }
        }

        CriterionOutcome::new(object_value == user_value, CriterionKind::Exact)
    }
}
