// ==========================================
// 对象构造器 - 引擎层
// ==========================================
// 职责: 参数匹配、选择状态、子对象、创建进度
// 红线: 匹配为纯函数; 引擎不持有向导步骤状态
// ==========================================

pub mod events;
pub mod matching;
pub mod matching_core;
pub mod parameter_selection;
pub mod progress;
pub mod sub_objects;

// 重导出核心引擎
pub use events::{
    ChannelEventPublisher, MatchEvent, MatchEventPublisher, MatchEventType, NoOpEventPublisher,
    OptionalEventPublisher,
};
pub use matching::{MatchOutcome, MatchingConfig, MatchingEngine};
pub use matching_core::{CriterionKind, CriterionOutcome, MatchingCore};
pub use parameter_selection::{ParameterSelection, ToggleResult, UserValues};
pub use progress::{CreationProgress, ProgressConfig, ProgressSnapshot, ProgressStatus};
pub use sub_objects::{clamp_count, SubObjectSelection};
