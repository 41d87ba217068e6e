// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use metrics::{counter, gauge};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, error, info, warn};

use crate::domain::models::engagement::EngagementEvent;
use crate::domain::services::trending_aggregator::{FlushOutcome, TrendingAggregator};

/// 队列错误类型
#[derive(Error, Debug)]
pub enum QueueError {
    /// 工作器已停止，无法再接收事件
    #[error("Trending queue is closed")]
    Closed,
}

/// 热度事件队列
///
/// 有界队列。队列满时生产者等待空位，不丢弃事件
#[derive(Clone)]
pub struct TrendingQueue {
    sender: mpsc::Sender<EngagementEvent>,
}

impl TrendingQueue {
    /// 创建指定容量的队列，返回队列句柄和工作器使用的接收端
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<EngagementEvent>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// 投递一个已持久化的事件
    pub async fn enqueue(&self, event: EngagementEvent) -> Result<(), QueueError> {
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                counter!("trending_queue_full_total").increment(1);
                warn!(
                    document_id = event.document_id,
                    "Trending queue is full, waiting for capacity"
                );
                self.sender
                    .send(event)
                    .await
                    .map_err(|_| QueueError::Closed)?;
            }
            Err(TrySendError::Closed(_)) => return Err(QueueError::Closed),
        }
        gauge!("trending_queue_depth").set(self.depth() as f64);
        Ok(())
    }

    /// 当前排队的事件数
    pub fn depth(&self) -> usize {
        self.sender.max_capacity() - self.sender.capacity()
    }
}

/// 热度工作器
///
/// 从队列接收事件并交给热度聚合器，信号量限制同时进行的刷新数量
pub struct TrendingWorker {
    aggregator: Arc<TrendingAggregator>,
    permits: Arc<Semaphore>,
    max_concurrent: usize,
}

impl TrendingWorker {
    pub fn new(aggregator: Arc<TrendingAggregator>, max_concurrent: usize) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            aggregator,
            permits: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
        }
    }

    /// 运行工作器，直到所有队列句柄被丢弃且进行中的任务完成
    pub async fn run(self, mut receiver: mpsc::Receiver<EngagementEvent>) {
        info!(
            "Trending worker started with {} concurrent flushes",
            self.max_concurrent
        );

        while let Some(event) = receiver.recv().await {
            let permit = match self.permits.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };
            let aggregator = self.aggregator.clone();
            tokio::spawn(async move {
                process_event(&aggregator, event).await;
                drop(permit);
            });
        }

        // Wait for in-flight tasks by taking every permit back
        if self
            .permits
            .acquire_many(self.max_concurrent as u32)
            .await
            .is_err()
        {
            warn!("Trending worker semaphore closed before draining");
        }
        info!("Trending worker stopped");
    }
}

async fn process_event(aggregator: &TrendingAggregator, event: EngagementEvent) {
    let document_id = event.document_id;
    match aggregator.record(event).await {
        Ok(FlushOutcome::Flushed(update)) => {
            counter!("trending_flush_success_total").increment(1);
            debug!(document_id, score = update.score, "Trending score flushed");
        }
        Ok(outcome) => debug!(document_id, ?outcome, "Trending event recorded"),
        Err(e) => {
            counter!("trending_flush_failures_total").increment(1);
            error!(document_id, "Trending flush failed: {}", e);
        }
    }
}
