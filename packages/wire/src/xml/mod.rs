//! XML node access: tag helpers and the selector-based [`WireTree`].

mod tree;
mod utils;

pub use tree::{all_matches, first_match_text, IntoWireTree, WireTree};
pub use utils::{get_tag_name, has_tag, inner_text};
