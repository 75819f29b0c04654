//! Delimited-text import and export of knowledge structures
//!
//! A thin collaborator over the factory: it never touches structure
//! internals, it only parses text into a (domain, states) pair and
//! hands that to [`KnowledgeStructure::from_family`].
//!
//! One state per separator-delimited chunk, items separated inside a
//! state by the item separator, whitespace around items ignored. The
//! empty state need not be listed; the full domain must be, same as at
//! the factory. Items are plain strings at this boundary.
//!
//! ```
//! let ks = learnspace::text::parse_structure("A\nB\nA,B\nA,C\nB,C\nA,B,C").unwrap();
//! assert_eq!(ks.domain().len(), 3);
//! assert_eq!(ks.states().len(), 7);
//! ```

use std::fs;
use std::path::Path;

use crate::errors::{StructureInitError, TextError};
use crate::state::KnowledgeState;
use crate::structure::KnowledgeStructure;

/// Default separator between states.
pub const STATE_SEP: &str = "\n";
/// Default separator between items of a state.
pub const ITEM_SEP: &str = ",";

/// Parse with the default separators (newline-separated states,
/// comma-separated items).
pub fn parse_structure(text: &str) -> Result<KnowledgeStructure<String>, StructureInitError> {
    parse_structure_with(text, STATE_SEP, ITEM_SEP)
}

/// Parse with explicit separators.
pub fn parse_structure_with(
    text: &str,
    state_sep: &str,
    item_sep: &str,
) -> Result<KnowledgeStructure<String>, StructureInitError> {
    let states = text
        .split(state_sep)
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| {
            chunk
                .split(item_sep)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_owned)
                .collect::<KnowledgeState<String>>()
        });
    KnowledgeStructure::from_family(states)
}

/// Read and parse a structure file with the default separators.
pub fn read_structure_from_path(
    path: impl AsRef<Path>,
) -> Result<KnowledgeStructure<String>, TextError> {
    let text = fs::read_to_string(path)?;
    Ok(parse_structure(&text)?)
}

/// Render the states back to delimited text.
///
/// States appear in ascending cardinality, the empty state is skipped
/// (the parser restores it), so parse → render → parse is stable.
pub fn render_states(
    structure: &KnowledgeStructure<String>,
    state_sep: &str,
    item_sep: &str,
) -> String {
    structure
        .ordered_states()
        .into_iter()
        .filter(|state| !state.is_empty())
        .map(|state| {
            state
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(item_sep)
        })
        .collect::<Vec<_>>()
        .join(state_sep)
}
