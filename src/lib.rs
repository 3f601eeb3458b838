//! # Passage Render
//!
//! 试卷篇章与题组的渲染引擎：重建带答案高亮的篇章正文，
//! 并把不同结构的题组（表格填空、选择题、判断题）渲染为统一的渲染树。
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 模型层（Models）
//! - `models/` - 快照结构、领域模型、答案区间、渲染树
//! - `QuestionRegistry` - 题号 → 题目
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，全部是纯函数
//! - `answer_matcher` - 答案与选项的等价判断
//! - `span_resolver` - 重叠答案区间消解
//! - `TextSegmentRenderer` - 正文分块 / 高亮文本流
//! - `SlotTemplateEngine` - 富文本插槽解析
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个题组"的渲染流程
//! - `GroupCtx` - 上下文封装（试卷 + 篇章 + 题组）
//! - `GroupRenderDispatcher` - 分类 → 选择渲染策略
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/test_renderer` - `(Test, QuestionRegistry) -> RenderTree`
//! - `orchestrator/batch_processor` - 批量快照渲染命令行程序
//!
//! ## 模块结构

pub mod config;
pub mod error;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Config, RenderOptions};
pub use error::{AppError, AppResult, ContentError};
pub use models::{QuestionRegistry, RenderTree, Test};
pub use orchestrator::{render_test, App, TestRenderer};
pub use workflow::{GroupCtx, GroupRenderDispatcher, RenderStrategy};
