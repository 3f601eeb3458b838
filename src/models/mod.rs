pub mod loaders;
pub mod question;
pub mod registry;
pub mod render;
pub mod snapshot;
pub mod span;

pub use loaders::{load_all_snapshots, load_test_snapshot};
pub use question::{GroupType, OptionItem, Question, QuestionGroup, QuestionType, TableContainer};
pub use registry::QuestionRegistry;
pub use render::{GroupBody, GroupView, PassageBody, PassageView, RenderTree};
pub use snapshot::{Passage, RichNode, Test};
pub use span::{AnswerSpan, Segment};
