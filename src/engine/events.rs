// ==========================================
// 对象构造器 - 引擎层事件发布
// ==========================================
// 职责: 定义匹配事件发布 trait，视图层订阅匹配状态变化
// 说明: Engine 层定义 trait，调用方提供实现（通道 / 空操作）
// ==========================================

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::Arc;
use tokio::sync::mpsc;

// ==========================================
// 匹配事件类型
// ==========================================

/// 匹配事件触发类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEventType {
    /// 匹配数量（重新计算后）
    MatchCountChanged,
    /// 收敛到唯一对象
    SingletonMatched,
    /// 过滤后无对象
    NoMatch,
}

impl MatchEventType {
    /// 转换为字符串标识
    pub fn as_str(&self) -> &str {
        match self {
            MatchEventType::MatchCountChanged => "MatchCountChanged",
            MatchEventType::SingletonMatched => "SingletonMatched",
            MatchEventType::NoMatch => "NoMatch",
        }
    }
}

/// 匹配事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    /// 对象类型 id
    pub object_type: String,
    /// 事件类型
    pub event_type: MatchEventType,
    /// 当前匹配数量
    pub count: usize,
    /// 唯一匹配的对象 id（仅 SingletonMatched）
    pub object_id: Option<String>,
}

impl MatchEvent {
    pub fn count_changed(object_type: &str, count: usize) -> Self {
        Self {
            object_type: object_type.to_string(),
            event_type: MatchEventType::MatchCountChanged,
            count,
            object_id: None,
        }
    }

    pub fn singleton(object_type: &str, object_id: &str) -> Self {
        Self {
            object_type: object_type.to_string(),
            event_type: MatchEventType::SingletonMatched,
            count: 1,
            object_id: Some(object_id.to_string()),
        }
    }

    pub fn no_match(object_type: &str) -> Self {
        Self {
            object_type: object_type.to_string(),
            event_type: MatchEventType::NoMatch,
            count: 0,
            object_id: None,
        }
    }
}

// ==========================================
// 事件发布 Trait
// ==========================================

/// 匹配事件发布者 Trait
///
/// # 实现说明
/// - `ChannelEventPublisher`: 转发到 tokio 通道，由视图消费
/// - `NoOpEventPublisher`: 单元测试或无订阅者场景
pub trait MatchEventPublisher: Send + Sync {
    /// 发布匹配事件
    ///
    /// # 返回
    /// - `Err`: 发布失败（调用方只记录日志，不中断匹配）
    fn publish(&self, event: MatchEvent) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// 空操作事件发布者
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

impl MatchEventPublisher for NoOpEventPublisher {
    fn publish(&self, event: MatchEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        tracing::debug!(
            "NoOpEventPublisher: 跳过事件发布 - object_type={}, event_type={}",
            event.object_type,
            event.event_type.as_str()
        );
        Ok(())
    }
}

/// 通道事件发布者
///
/// 接收端关闭后发布返回错误
#[derive(Debug, Clone)]
pub struct ChannelEventPublisher {
    tx: mpsc::UnboundedSender<MatchEvent>,
}

impl ChannelEventPublisher {
    /// 创建发布者与对应的接收端
    pub fn new() -> (Self, mpsc::UnboundedReceiver<MatchEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl MatchEventPublisher for ChannelEventPublisher {
    fn publish(&self, event: MatchEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.tx.send(event)?;
        Ok(())
    }
}

/// 向导使用的事件出口
///
/// 未配置发布者时跳过事件；发布失败只记录警告，匹配流程照常继续
pub struct OptionalEventPublisher {
    inner: Option<Arc<dyn MatchEventPublisher>>,
}

impl OptionalEventPublisher {
    pub fn with_publisher(publisher: Arc<dyn MatchEventPublisher>) -> Self {
        Self {
            inner: Some(publisher),
        }
    }

    /// 不发布事件的实例
    pub fn none() -> Self {
        Self { inner: None }
    }

    /// 发布事件
    ///
    /// # 返回
    /// - true: 事件已交给发布者
    /// - false: 未配置发布者，或发布失败
    pub fn publish(&self, event: MatchEvent) -> bool {
        let Some(publisher) = &self.inner else {
            tracing::debug!(
                "未配置匹配事件发布者，跳过: object_type={}, event_type={}",
                event.object_type,
                event.event_type.as_str()
            );
            return false;
        };

        let event_type = event.event_type;
        match publisher.publish(event) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    "匹配事件发布失败: event_type={}, error={}",
                    event_type.as_str(),
                    e
                );
                false
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }
}

impl Default for OptionalEventPublisher {
    fn default() -> Self {
        Self::none()
    }
}
