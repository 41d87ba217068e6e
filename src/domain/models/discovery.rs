// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::errors::RankingError;

/// 默认页码
pub const DEFAULT_PAGE_NUMBER: u64 = 1;
/// 默认每页条数
pub const DEFAULT_LIMIT: u64 = 5;
/// 附近新闻的默认搜索半径（公里）
pub const DEFAULT_RADIUS_KM: i64 = 10;

/// 分页参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page_number: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// 由客户端传入的 `p`/`l` 构造分页参数，缺失或非正数时使用默认值
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let positive = |value: Option<i64>| value.filter(|v| *v > 0).map(|v| v as u64);
        Self {
            page_number: positive(page).unwrap_or(DEFAULT_PAGE_NUMBER),
            limit: positive(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// 结果偏移量：limit × (page - 1)
    pub fn offset(&self) -> u64 {
        self.limit.saturating_mul(self.page_number.saturating_sub(1))
    }

    /// 总页数：向下整除，有余数时加一；`limit` 为 0 时返回 0
    pub fn total_pages(&self, total_records: u64) -> u64 {
        let Some(mut pages) = total_records.checked_div(self.limit) else {
            return 0;
        };
        if total_records % self.limit > 0 {
            pages += 1;
        }
        pages
    }

    /// 页码和每页条数都必须至少为 1
    ///
    /// # 错误
    ///
    /// * `RankingError::InvalidInput` - 页码或每页条数为 0
    pub fn validate(&self) -> Result<(), RankingError> {
        if self.page_number == 0 {
            return Err(RankingError::InvalidInput("invalid page number".to_string()));
        }
        if self.limit == 0 {
            return Err(RankingError::InvalidInput("invalid limit".to_string()));
        }
        Ok(())
    }
}

/// 检索模式
///
/// 在编排边界处解析一次，每个变体对应一个查询构建函数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DiscoveryMode {
    Category { category: String },
    Score { score: f64 },
    Source { source: String },
    Nearby { lat: f64, long: f64, radius: i64 },
    Search { query: String },
    Trending { lat: f64, long: f64 },
}

impl DiscoveryMode {
    /// 模式名称，用于指标标签
    pub fn name(&self) -> &'static str {
        match self {
            DiscoveryMode::Category { .. } => "category",
            DiscoveryMode::Score { .. } => "score",
            DiscoveryMode::Source { .. } => "source",
            DiscoveryMode::Nearby { .. } => "nearby",
            DiscoveryMode::Search { .. } => "search",
            DiscoveryMode::Trending { .. } => "trending",
        }
    }
}

/// 新闻发现请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryRequest {
    #[serde(flatten)]
    pub mode: DiscoveryMode,
    #[serde(flatten)]
    pub pagination: Pagination,
}

impl DiscoveryRequest {
    pub fn new(mode: DiscoveryMode, pagination: Pagination) -> Self {
        Self { mode, pagination }
    }

    /// 按模式校验请求，并规范化可修正的字段
    ///
    /// 在任何外部调用之前执行。附近模式下非正的半径会被替换为 10 公里
    ///
    /// # 错误
    ///
    /// * `RankingError::InvalidInput` - 分页参数为 0，或主筛选维度为空或数值非正
    pub fn validate(mut self) -> Result<Self, RankingError> {
        self.pagination.validate()?;
        match &mut self.mode {
            DiscoveryMode::Category { category } => {
                if category.trim().is_empty() {
                    return Err(RankingError::InvalidInput("invalid category".to_string()));
                }
            }
            DiscoveryMode::Score { score } => {
                if !score.is_finite() || *score <= 0.0 {
                    return Err(RankingError::InvalidInput("invalid score".to_string()));
                }
            }
            DiscoveryMode::Source { source } => {
                if source.trim().is_empty() {
                    return Err(RankingError::InvalidInput("invalid source".to_string()));
                }
            }
            DiscoveryMode::Nearby { lat, long, radius } => {
                validate_point(*lat, *long)?;
                if *radius <= 0 {
                    *radius = DEFAULT_RADIUS_KM;
                }
            }
            DiscoveryMode::Search { query } => {
                if query.trim().is_empty() {
                    return Err(RankingError::InvalidInput("invalid query".to_string()));
                }
            }
            DiscoveryMode::Trending { lat, long } => validate_point(*lat, *long)?,
        }
        Ok(self)
    }

    /// 将请求序列化为通用键值形式，随响应回显
    pub fn to_search_query(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

// Zero or negative coordinates are treated as unset.
fn validate_point(lat: f64, long: f64) -> Result<(), RankingError> {
    if !lat.is_finite() || lat <= 0.0 {
        return Err(RankingError::InvalidInput("invalid latitude".to_string()));
    }
    if !long.is_finite() || long <= 0.0 {
        return Err(RankingError::InvalidInput("invalid longitude".to_string()));
    }
    Ok(())
}
