// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::models::engagement::{EngagementCounts, EngagementEvent, TrendingScoreUpdate};
use crate::domain::repositories::engagement_repository::EngagementRepository;
use crate::domain::search::engine::TrendingScoreSink;
use crate::utils::errors::RankingError;

/// 默认衰减系数（每小时）
pub const DEFAULT_DECAY_LAMBDA: f64 = 0.03;

/// 单个文档的缓冲状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    /// 无缓冲事件
    Idle,
    /// 正在累积事件
    Accumulating,
    /// 正在写回热度分数
    Flushing,
}

/// 一次 `record` 或 `flush` 的结果
#[derive(Debug, Clone, PartialEq)]
pub enum FlushOutcome {
    /// 事件已缓冲，未达到批量阈值
    Buffered,
    /// 同一文档已有刷新在进行，或缓冲为空
    Skipped,
    /// 热度分数已写回
    Flushed(TrendingScoreUpdate),
    /// 存储中没有该文档的事件，未写回
    NoEvents,
}

#[derive(Debug)]
struct DocumentBuffer {
    events: Vec<EngagementEvent>,
    state: BufferState,
}

/// 热度聚合器
///
/// 按文档缓冲互动事件，达到批量阈值后根据全部历史事件重新计算
/// 热度分数并写回搜索引擎。每个文档同一时刻最多一个刷新
pub struct TrendingAggregator {
    repo: Arc<dyn EngagementRepository>,
    sink: Arc<dyn TrendingScoreSink>,
    buffers: DashMap<i64, DocumentBuffer>,
    batch_size: usize,
    lambda: f64,
}

impl TrendingAggregator {
    /// 创建热度聚合器
    ///
    /// # 参数
    ///
    /// * `repo` - 互动事件存储
    /// * `sink` - 热度分数写回目标
    /// * `batch_size` - 触发刷新的缓冲事件数，最小为 1
    /// * `lambda` - 每小时衰减系数
    pub fn new(
        repo: Arc<dyn EngagementRepository>,
        sink: Arc<dyn TrendingScoreSink>,
        batch_size: usize,
        lambda: f64,
    ) -> Self {
        Self {
            repo,
            sink,
            buffers: DashMap::new(),
            batch_size: batch_size.max(1),
            lambda,
        }
    }

    /// 记录一个互动事件，达到批量阈值且没有进行中的刷新时触发刷新
    pub async fn record(&self, event: EngagementEvent) -> Result<FlushOutcome, RankingError> {
        let document_id = event.document_id;
        let should_flush = {
            let mut entry = self
                .buffers
                .entry(document_id)
                .or_insert_with(|| DocumentBuffer {
                    events: Vec::new(),
                    state: BufferState::Accumulating,
                });
            entry.events.push(event);
            entry.state != BufferState::Flushing && entry.events.len() >= self.batch_size
        };

        if should_flush {
            self.flush(document_id).await
        } else {
            Ok(FlushOutcome::Buffered)
        }
    }

    /// 刷新一个文档的热度分数
    ///
    /// 成功时只移除刷新开始时已缓冲的事件；刷新期间到达的事件保留，
    /// 若已达到批量阈值则继续刷新。失败时缓冲保持不变
    ///
    /// # 错误
    ///
    /// * `RankingError::Upstream` - 事件存储或搜索引擎写回失败
    pub async fn flush(&self, document_id: i64) -> Result<FlushOutcome, RankingError> {
        loop {
            let snapshot = match self.begin_flush(document_id) {
                Some(len) => len,
                None => {
                    debug!(document_id, "Flush skipped");
                    return Ok(FlushOutcome::Skipped);
                }
            };

            let outcome = match self.write_current_score(document_id).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    if let Some(mut entry) = self.buffers.get_mut(&document_id) {
                        entry.state = BufferState::Accumulating;
                    }
                    warn!(document_id, "Trending flush failed, keeping {} buffered events: {}", snapshot, e);
                    return Err(e);
                }
            };

            if !self.finish_flush(document_id, snapshot) {
                return Ok(outcome);
            }
            debug!(document_id, "Events arrived during flush, flushing again");
        }
    }

    /// 文档当前的缓冲状态
    pub fn state(&self, document_id: i64) -> BufferState {
        self.buffers
            .get(&document_id)
            .map(|entry| entry.state)
            .unwrap_or(BufferState::Idle)
    }

    /// 文档当前缓冲的事件数
    pub fn pending(&self, document_id: i64) -> usize {
        self.buffers
            .get(&document_id)
            .map(|entry| entry.events.len())
            .unwrap_or(0)
    }

    fn begin_flush(&self, document_id: i64) -> Option<usize> {
        let mut entry = self.buffers.get_mut(&document_id)?;
        if entry.state == BufferState::Flushing || entry.events.is_empty() {
            return None;
        }
        entry.state = BufferState::Flushing;
        Some(entry.events.len())
    }

    // Returns true when the remaining buffer already needs another flush.
    fn finish_flush(&self, document_id: i64, snapshot: usize) -> bool {
        let again = match self.buffers.get_mut(&document_id) {
            Some(mut entry) => {
                let drained = snapshot.min(entry.events.len());
                entry.events.drain(..drained);
                entry.state = BufferState::Accumulating;
                entry.events.len() >= self.batch_size
            }
            None => false,
        };
        self.buffers.remove_if(&document_id, |_, entry| {
            entry.events.is_empty() && entry.state != BufferState::Flushing
        });
        again
    }

    async fn write_current_score(&self, document_id: i64) -> Result<FlushOutcome, RankingError> {
        let counts = self.repo.aggregate(document_id).await?;

        let last_event_time = match counts.last_event_time {
            Some(ts) if counts.total_events() > 0 => ts,
            _ => {
                info!(document_id, "No stored events, skipping trending write");
                return Ok(FlushOutcome::NoEvents);
            }
        };

        let update = TrendingScoreUpdate {
            document_id,
            score: trending_score(&counts, last_event_time, Utc::now(), self.lambda),
            last_event_time,
        };
        self.sink.write_score(&update).await?;

        debug!(document_id, score = update.score, "Trending score written");
        Ok(FlushOutcome::Flushed(update))
    }
}

/// 指数时间衰减因子，小时数小于 0 时按 0 计算
pub fn decay_factor(hours: f64, lambda: f64) -> f64 {
    (-lambda * hours.max(0.0)).exp()
}

/// 计算热度分数
///
/// `(likes×4 + shares×3 + views×2 + clicks×1) × exp(−λ × 距最后事件小时数)`
pub fn trending_score(
    counts: &EngagementCounts,
    last_event_time: DateTime<Utc>,
    now: DateTime<Utc>,
    lambda: f64,
) -> f64 {
    let hours = (now - last_event_time).num_milliseconds() as f64 / 3_600_000.0;
    counts.weighted_total() as f64 * decay_factor(hours, lambda)
}
