//! Tasks: lookup, scaffolding, and selection

mod resolver;
mod scaffold;
mod switch;

pub use resolver::{BUILD_DESCRIPTOR, TaskResolver};
pub use scaffold::scaffold_solution;
pub use switch::{SelectOptions, Selection, select_task};
