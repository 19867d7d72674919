// ==========================================
// 对象构造器 - 创建进度任务
// ==========================================
// 职责: 以固定节拍从 0 推进到 100 的可取消任务
// 状态: start → Running → Completed | Cancelled
// 红线: 取消或丢弃句柄后立即停止推进；不保留任何中间结果
// ==========================================

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::runtime::{Handle, TryCurrentError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// 进度任务配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressConfig {
    /// 节拍间隔
    pub tick: Duration,
    /// 每个节拍推进的百分比
    pub step: u8,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(300),
            step: 10,
        }
    }
}

impl ProgressConfig {
    /// 归一化: tick 至少 1ms，step 限定在 1..=100
    pub fn normalized(self) -> Self {
        Self {
            tick: self.tick.max(Duration::from_millis(1)),
            step: self.step.clamp(1, 100),
        }
    }
}

/// 进度状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressStatus {
    Running,
    Completed,
    Cancelled,
}

/// 进度快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub percent: u8,
    pub status: ProgressStatus,
}

impl ProgressSnapshot {
    fn running(percent: u8) -> Self {
        Self {
            percent,
            status: ProgressStatus::Running,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status != ProgressStatus::Running
    }
}

// ==========================================
// CreationProgress - 进度任务句柄
// ==========================================
// 丢弃句柄等同于取消
pub struct CreationProgress {
    task_id: Uuid,
    cancel_tx: watch::Sender<bool>,
    snapshot_rx: watch::Receiver<ProgressSnapshot>,
    join: Option<JoinHandle<ProgressStatus>>,
}

impl CreationProgress {
    /// 在当前 tokio 运行时上启动进度任务
    ///
    /// # 返回
    /// - Err: 调用方不在 tokio 运行时内
    pub fn start(config: ProgressConfig) -> Result<Self, TryCurrentError> {
        let handle = Handle::try_current()?;
        let config = config.normalized();
        let task_id = Uuid::new_v4();

        let (cancel_tx, cancel_rx) = watch::channel(false);
        let (snapshot_tx, snapshot_rx) = watch::channel(ProgressSnapshot::running(0));

        tracing::info!(
            "创建进度任务启动: task_id={}, tick_ms={}, step={}",
            task_id,
            config.tick.as_millis(),
            config.step
        );

        let join = handle.spawn(run_ticker(task_id, config, cancel_rx, snapshot_tx));

        Ok(Self {
            task_id,
            cancel_tx,
            snapshot_rx,
            join: Some(join),
        })
    }

    pub fn task_id(&self) -> Uuid {
        self.task_id
    }

    /// 当前快照
    pub fn snapshot(&self) -> ProgressSnapshot {
        *self.snapshot_rx.borrow()
    }

    /// 订阅快照变化
    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.snapshot_rx.clone()
    }

    /// 请求取消（幂等）
    pub fn cancel(&self) {
        self.cancel_tx.send_replace(true);
    }

    /// 等待任务结束，返回最终状态
    pub async fn wait(mut self) -> ProgressStatus {
        let Some(join) = self.join.take() else {
            return self.snapshot().status;
        };

        match join.await {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!("创建进度任务异常结束: task_id={}, error={}", self.task_id, e);
                ProgressStatus::Cancelled
            }
        }
    }
}

impl Drop for CreationProgress {
    fn drop(&mut self) {
        if self.join.is_some() {
            self.cancel_tx.send_replace(true);
        }
    }
}

async fn run_ticker(
    task_id: Uuid,
    config: ProgressConfig,
    mut cancel_rx: watch::Receiver<bool>,
    snapshot_tx: watch::Sender<ProgressSnapshot>,
) -> ProgressStatus {
    let mut interval = tokio::time::interval(config.tick);
    // 首个 tick 立即完成，不计入进度
    interval.tick().await;

    let mut percent: u8 = 0;
    loop {
        tokio::select! {
            biased;

            changed = cancel_rx.changed() => {
                if changed.is_err() || *cancel_rx.borrow() {
                    snapshot_tx.send_replace(ProgressSnapshot {
                        percent,
                        status: ProgressStatus::Cancelled,
                    });
                    tracing::info!("创建进度任务已取消: task_id={}, percent={}", task_id, percent);
                    return ProgressStatus::Cancelled;
                }
            }

            _ = interval.tick() => {
                percent = percent.saturating_add(config.step).min(100);
                if percent >= 100 {
                    snapshot_tx.send_replace(ProgressSnapshot {
                        percent: 100,
                        status: ProgressStatus::Completed,
                    });
                    tracing::info!("创建进度任务完成: task_id={}", task_id);
                    return ProgressStatus::Completed;
                }
                snapshot_tx.send_replace(ProgressSnapshot::running(percent));
                tracing::trace!("创建进度: task_id={}, percent={}", task_id, percent);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_normalized() {
        let config = ProgressConfig {
            tick: Duration::ZERO,
            step: 0,
        }
        .normalized();
        assert_eq!(config.tick, Duration::from_millis(1));
        assert_eq!(config.step, 1);

        let config = ProgressConfig {
            tick: Duration::from_millis(50),
            step: 250,
        }
        .normalized();
        assert_eq!(config.step, 100);
    }

    #[test]
    fn test_start_outside_runtime_fails() {
        assert!(CreationProgress::start(ProgressConfig::default()).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_to_completion() {
        let started = tokio::time::Instant::now();
        let progress = CreationProgress::start(ProgressConfig::default()).unwrap();
        assert_eq!(progress.snapshot(), ProgressSnapshot::running(0));

        let status = progress.wait().await;
        assert_eq!(status, ProgressStatus::Completed);
        // 10 个节拍 × 300ms
        assert!(started.elapsed() >= Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_snapshot_advances_by_step() {
        let progress = CreationProgress::start(ProgressConfig::default()).unwrap();
        let mut rx = progress.subscribe();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), ProgressSnapshot::running(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_step_overshoot_caps_at_hundred() {
        let progress = CreationProgress::start(ProgressConfig {
            tick: Duration::from_millis(10),
            step: 30,
        })
        .unwrap();
        let rx = progress.subscribe();
        assert_eq!(progress.wait().await, ProgressStatus::Completed);
        assert_eq!(rx.borrow().percent, 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_progress() {
        let progress = CreationProgress::start(ProgressConfig::default()).unwrap();
        let rx = progress.subscribe();
        progress.cancel();

        assert_eq!(progress.wait().await, ProgressStatus::Cancelled);
        let snapshot = *rx.borrow();
        assert_eq!(snapshot.status, ProgressStatus::Cancelled);
        assert!(snapshot.percent < 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let progress = CreationProgress::start(ProgressConfig::default()).unwrap();
        let mut rx = progress.subscribe();
        let task_id = progress.task_id();
        assert!(!task_id.is_nil());
        drop(progress);

        while !rx.borrow().is_finished() {
            if rx.changed().await.is_err() {
                break;
            }
        }
        assert_eq!(rx.borrow().status, ProgressStatus::Cancelled);
    }
}
