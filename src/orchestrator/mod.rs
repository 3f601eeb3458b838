//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责把一份或多份试卷快照组织成渲染树，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量试卷渲染器
//! - 管理应用生命周期（初始化、运行）
//! - 批量加载快照（`Vec<Test>`），控制并发加载数量
//! - 输出渲染结果与全局统计信息
//!
//! ### `test_renderer` - 单套试卷渲染器
//! - 遍历单套试卷的所有篇章与题组
//! - 重建篇章正文，分发题组渲染
//! - 纯函数：不做 I/O，不持有可变状态
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<Test>)
//!     ↓
//! test_renderer (处理 Vec<Passage>)
//!     ↓
//! workflow::GroupRenderDispatcher (处理单个题组)
//!     ↓
//! services (能力层：span / segment / slot / matcher)
//! ```

pub mod batch_processor;
pub mod test_renderer;

// 重新导出主要类型
pub use batch_processor::{App, RenderStats};
pub use test_renderer::{collect_spans, render_test, TestRenderer};
