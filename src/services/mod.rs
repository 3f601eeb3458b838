pub mod answer_matcher;
pub mod segment_renderer;
pub mod slot_template;
pub mod span_resolver;

pub use segment_renderer::TextSegmentRenderer;
pub use slot_template::SlotTemplateEngine;
