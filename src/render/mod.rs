mod custom;
mod rows;
mod view;

pub use custom::{ItemRenderer, RenderedLine};
pub use rows::{EditTarget, Row, RowKind, build_rows};
pub use view::{UiContext, draw};
