pub mod group_ctx;
pub mod group_dispatcher;

pub use group_ctx::GroupCtx;
pub use group_dispatcher::{classify, GroupRenderDispatcher, RenderStrategy};
