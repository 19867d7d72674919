// ==========================================
// 对象构造器 - 对象创建终结器
// ==========================================
// 职责: 进度任务完成后生成对象标识并组装 CreatedObject
// 说明: 无持久化；标识为 <前缀><0..=9999 随机数>
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{CreatedObject, CreationRequest};
use crate::engine::{CreationProgress, ProgressConfig, ProgressSnapshot, ProgressStatus};
use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

// ==========================================
// ObjectFinalizer Trait
// ==========================================
#[async_trait]
pub trait ObjectFinalizer: Send + Sync {
    /// 完成对象创建
    async fn finalize(&self, request: CreationRequest) -> ApiResult<CreatedObject>;
}

/// 模拟终结器（随机标识）
#[derive(Debug, Clone)]
pub struct SimulatedFinalizer {
    id_prefix: String,
}

impl SimulatedFinalizer {
    pub fn new(id_prefix: &str) -> Self {
        Self {
            id_prefix: id_prefix.to_string(),
        }
    }

    /// 生成标识: 前缀 + [0, 9999]
    pub fn generate_id(&self) -> String {
        let n: u32 = rand::thread_rng().gen_range(0..10_000);
        format!("{}{}", self.id_prefix, n)
    }
}

impl Default for SimulatedFinalizer {
    fn default() -> Self {
        Self::new("OBJ-")
    }
}

#[async_trait]
impl ObjectFinalizer for SimulatedFinalizer {
    async fn finalize(&self, request: CreationRequest) -> ApiResult<CreatedObject> {
        if request.object_name.trim().is_empty() {
            return Err(ApiError::InvalidInput("对象名称不能为空".to_string()));
        }

        let id = self.generate_id();
        tracing::info!(
            "对象已创建: id={}, name={}, source={}, sub_objects={}",
            id,
            request.object_name,
            request.source_object.id,
            request.sub_objects.len()
        );
        Ok(CreatedObject::from_request(id, request))
    }
}

// ==========================================
// CreationJob - 进度任务 + 终结器
// ==========================================
// 进度完成后调用终结器；取消时返回 CreationCancelled，不产生对象
pub struct CreationJob {
    request: CreationRequest,
    progress: CreationProgress,
    finalizer: Arc<dyn ObjectFinalizer>,
}

impl CreationJob {
    /// 启动创建任务（需在 tokio 运行时内调用）
    pub fn start(
        request: CreationRequest,
        config: ProgressConfig,
        finalizer: Arc<dyn ObjectFinalizer>,
    ) -> ApiResult<Self> {
        let progress = CreationProgress::start(config)
            .map_err(|e| ApiError::InternalError(format!("无法启动创建进度任务: {}", e)))?;

        Ok(Self {
            request,
            progress,
            finalizer,
        })
    }

    pub fn task_id(&self) -> Uuid {
        self.progress.task_id()
    }

    pub fn request(&self) -> &CreationRequest {
        &self.request
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.progress.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.progress.subscribe()
    }

    pub fn cancel(&self) {
        self.progress.cancel();
    }

    /// 等待进度结束并完成创建
    pub async fn wait(self) -> ApiResult<CreatedObject> {
        let task_id = self.progress.task_id();
        match self.progress.wait().await {
            ProgressStatus::Completed => self.finalizer.finalize(self.request).await,
            status => {
                tracing::info!("对象创建未完成: task_id={}, status={:?}", task_id, status);
                Err(ApiError::CreationCancelled(format!(
                    "task_id={}, object={}",
                    task_id, self.request.object_name
                )))
            }
        }
    }
}
