pub mod emitter;
pub mod render;
pub mod source_map;
pub mod span;

pub use emitter::{Handler, Severity};
pub use render::ContextOptions;
pub use source_map::{Location, SourceFile};
pub use span::Span;
