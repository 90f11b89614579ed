//! Marketing content rendering — line-break normalization, call-to-action
//! tag expansion, and placeholder discovery for authoring previews.

pub mod placeholders;
pub mod renderer;

pub use placeholders::placeholder_names;
pub use renderer::{render, ContentRenderer, CtaStyle};
