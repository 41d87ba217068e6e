// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 从自由文本中识别出的语义意图
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentTag {
    Category,
    Source,
    Latest,
    Nearby,
}

/// 意图解析结果，仅在单个请求内存在
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntentResult {
    pub entities: BTreeSet<String>,
    pub intent: BTreeSet<IntentTag>,
}

impl IntentResult {
    pub fn has(&self, tag: IntentTag) -> bool {
        self.intent.contains(&tag)
    }
}
