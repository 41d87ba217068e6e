// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 排名服务（ranking_service）：发现请求的校验、查询构建、搜索和结果映射
/// - 查询构建（query_builder）：把各发现模式翻译为搜索引擎查询
/// - 意图解析（intent_resolver）：调用语言模型提取实体和意图
/// - 结果映射（result_mapper）：分页结果页与摘要合并
/// - 摘要生成（summarizer）：整页批量摘要
/// - 热度聚合（trending_aggregator）：按文档缓冲互动事件并写回热度分数
/// - 互动服务（engagement_service）：持久化互动事件并投递给热度队列
/// - LLM服务（llm_service）：OpenAI 兼容的文本生成接口
/// - 新闻导入（ingestion_service）：新闻文件写入新闻表和搜索索引
pub mod engagement_service;
pub mod ingestion_service;
pub mod intent_resolver;
pub mod llm_service;
pub mod query_builder;
pub mod ranking_service;
pub mod result_mapper;
pub mod summarizer;
pub mod trending_aggregator;
