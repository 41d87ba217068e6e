// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 发现请求（discovery）：按模式划分的检索请求和分页参数
/// - 互动事件（engagement）：用户互动事件、聚合计数和热度分数
/// - 意图（intent）：从自由文本中提取的实体和意图标签
/// - 新闻（news）：索引文档投影和客户端视图
/// - 结果页（result_page）：分页后的响应信封
pub mod discovery;
pub mod engagement;
pub mod intent;
pub mod news;
pub mod result_page;
