// Live preview renderer: document -> visual tree -> HTML.
// No state of its own; callers re-render after every document change.

pub mod html;
pub mod tree;

pub use html::{to_html, Scale};
pub use tree::{render, PreviewTree};
