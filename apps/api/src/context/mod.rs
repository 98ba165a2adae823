// CV context: turns the editor's CV document into prompt-ready text.

pub mod formatter;

pub use formatter::{format_cv_context, NO_CV_DATA};
