pub mod formula;
pub mod input;

pub use crate::error::{FormulaError, ParseError};
pub use formula::{Formula, FormulaVars};
pub use input::{load_project_file, load_settings_file, ProjectInput};
