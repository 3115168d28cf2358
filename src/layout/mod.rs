pub mod conversion;
pub mod defaults;
pub mod loader;
pub mod model;
pub mod path;
pub mod raw;

pub use conversion::*;
pub use defaults::initial_values;
pub use loader::{DEFAULT_FIXTURE, LayoutLoader};
pub use model::*;
pub use path::DocumentPath;
pub use raw::*;
