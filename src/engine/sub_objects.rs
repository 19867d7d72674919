// ==========================================
// 对象构造器 - 子对象选择
// ==========================================
// 职责: 子对象勾选与数量维护
// 红线: 数量始终 >= 1；非法输入归一为 1
// ==========================================

use crate::domain::SubObject;

/// 子对象选择状态
#[derive(Debug, Clone, Default)]
pub struct SubObjectSelection {
    items: Vec<SubObject>,
}

impl SubObjectSelection {
    /// 以模板创建（全部未勾选，数量取模板值且不小于 1）
    pub fn new(templates: Vec<SubObject>) -> Self {
        let items = templates
            .into_iter()
            .map(|mut item| {
                item.selected = false;
                item.count = item.count.max(1);
                item
            })
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[SubObject] {
        &self.items
    }

    pub fn get(&self, sub_object_id: &str) -> Option<&SubObject> {
        self.items.iter().find(|s| s.id == sub_object_id)
    }

    /// 切换勾选状态，返回新的勾选状态
    pub fn toggle(&mut self, sub_object_id: &str) -> Option<bool> {
        let item = self.items.iter_mut().find(|s| s.id == sub_object_id)?;
        item.selected = !item.selected;
        Some(item.selected)
    }

    /// 按原始输入设置数量（见 clamp_count），返回生效数量
    pub fn set_count(&mut self, sub_object_id: &str, raw: &str) -> Option<u32> {
        self.set_count_value(sub_object_id, clamp_count(raw))
    }

    /// 设置数量（小于 1 时取 1），返回生效数量
    pub fn set_count_value(&mut self, sub_object_id: &str, count: u32) -> Option<u32> {
        let item = self.items.iter_mut().find(|s| s.id == sub_object_id)?;
        item.count = count.max(1);
        Some(item.count)
    }

    /// 已勾选子对象（模板顺序）
    pub fn selected(&self) -> Vec<SubObject> {
        self.items.iter().filter(|s| s.selected).cloned().collect()
    }

    pub fn selected_count(&self) -> usize {
        self.items.iter().filter(|s| s.selected).count()
    }
}

/// 解析数量输入
///
/// 取前导整数部分（可带符号，允许前导空白）；
/// 无数字或结果小于 1 时返回 1，超出范围时饱和到 u32::MAX
pub fn clamp_count(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        &rest[..end]
    };

    if digits.is_empty() || negative {
        return 1;
    }

    let value = digits.parse::<u32>().unwrap_or(u32::MAX);
    value.max(1)
}
