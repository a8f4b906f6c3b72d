//! Document tree runtime: building, walking and serializing.

pub mod builder;
pub mod fragment;
pub mod html;
pub mod text;
pub mod visit;

pub use builder::{build_tree, TreeBuilder};
pub use fragment::{parse_fragment, FragmentError};
pub use html::{node_to_html, to_html};
pub use text::{capitalize, text_content};
pub use visit::{walk, Visit, Visitor};
