// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 未设置 `RUST_LOG` 时的默认过滤规则
pub const DEFAULT_FILTER: &str = "info,newsrank=debug";

/// 设置为 `json` 时输出结构化日志
pub const LOG_FORMAT_ENV: &str = "NEWSRANK_LOG_FORMAT";

pub fn init_telemetry() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    if use_json(std::env::var(LOG_FORMAT_ENV).ok().as_deref()) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

pub(crate) fn use_json(format: Option<&str>) -> bool {
    matches!(format, Some(value) if value.eq_ignore_ascii_case("json"))
}
