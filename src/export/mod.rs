//! Diagnostic model export.

mod lp;

pub use lp::{export_lp, to_lp_string, write_lp, LpOptions};
