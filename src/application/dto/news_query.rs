// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::models::discovery::{DiscoveryMode, DiscoveryRequest, Pagination};

/// 发现接口的查询字符串参数
///
/// 各路由只读取自己需要的字段，分页参数 `p`/`l` 对所有路由生效
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FetchNewsQuery {
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub radius: Option<i64>,
    pub q: Option<String>,
    pub p: Option<i64>,
    pub l: Option<i64>,
}

impl FetchNewsQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.p, self.l)
    }

    /// 附近模式，缺失的坐标按 0 处理并在校验阶段被拒绝
    pub fn nearby(&self) -> DiscoveryRequest {
        DiscoveryRequest::new(
            DiscoveryMode::Nearby {
                lat: self.lat.unwrap_or_default(),
                long: self.long.unwrap_or_default(),
                radius: self.radius.unwrap_or_default(),
            },
            self.pagination(),
        )
    }

    pub fn trending(&self) -> DiscoveryRequest {
        DiscoveryRequest::new(
            DiscoveryMode::Trending {
                lat: self.lat.unwrap_or_default(),
                long: self.long.unwrap_or_default(),
            },
            self.pagination(),
        )
    }

    pub fn search(&self) -> DiscoveryRequest {
        DiscoveryRequest::new(
            DiscoveryMode::Search {
                query: self.q.clone().unwrap_or_default(),
            },
            self.pagination(),
        )
    }
}
