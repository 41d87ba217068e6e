// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::news::NewsArticle;

/// 分页结果页，同时也是 HTTP 响应信封
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    pub articles: Vec<NewsArticle>,
    pub total_pages: u64,
    pub total_records: u64,
    pub page_number: u64,
    pub search_query: Map<String, Value>,
}
