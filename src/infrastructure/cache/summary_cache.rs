// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use dashmap::DashMap;
use metrics::counter;
use std::time::{Duration, Instant};

use crate::config::settings::SummaryCacheSettings;

// Unit separator, never present in article text
const KEY_SEPARATOR: char = '\u{1f}';

/// 摘要缓存
///
/// 以整页描述拼接为键缓存批量摘要结果，带有效期和容量上限
pub struct SummaryCache {
    cache: DashMap<String, (Vec<String>, Instant)>,
    ttl: Duration,
    max_entries: usize,
}

impl SummaryCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            cache: DashMap::new(),
            ttl,
            max_entries,
        }
    }

    pub fn from_settings(settings: &SummaryCacheSettings) -> Self {
        Self::new(Duration::from_secs(settings.ttl_secs), settings.max_entries)
    }

    pub fn get(&self, texts: &[String]) -> Option<Vec<String>> {
        let key = cache_key(texts);
        let expired = match self.cache.get(&key) {
            Some(entry) if entry.1.elapsed() < self.ttl => {
                counter!("summary_cache_hits_total").increment(1);
                return Some(entry.0.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.cache.remove(&key);
        }
        counter!("summary_cache_misses_total").increment(1);
        None
    }

    pub fn insert(&self, texts: &[String], summaries: Vec<String>) {
        if self.cache.len() >= self.max_entries {
            let ttl = self.ttl;
            self.cache.retain(|_, entry| entry.1.elapsed() < ttl);
            if self.cache.len() >= self.max_entries {
                return;
            }
        }
        self.cache
            .insert(cache_key(texts), (summaries, Instant::now()));
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

fn cache_key(texts: &[String]) -> String {
    let mut key = String::new();
    for (i, text) in texts.iter().enumerate() {
        if i > 0 {
            key.push(KEY_SEPARATOR);
        }
        key.push_str(text);
    }
    key
}
