//! Graph export for drawing: style resolution and Graphviz output.

mod dot;
mod style;

pub use dot::{DotOptions, Layout, sheet_colors, write_dot};
pub use style::{SizeTier, StyleConfig, StyleOverride, load_style_override};
