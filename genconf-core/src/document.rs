//! Document assembly

use std::fmt::Write;

use crate::rules::RuleBlock;

pub const HEADER: &str = "<?xml version=\"1.0\"?>\n\
<!DOCTYPE fontconfig SYSTEM \"urn:fontconfig:fonts.dtd\">\n\
<fontconfig>\n";

pub const FOOTER: &str = "</fontconfig>\n";

/// Ordered rule blocks for one generation run.
///
/// A document built from an empty font set renders as the empty string; it
/// is "nothing to emit", not a malformed configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputDocument {
    blocks: Option<Vec<RuleBlock>>,
}

impl OutputDocument {
    /// Document for a scan that found no fonts.
    pub fn empty() -> Self {
        Self { blocks: None }
    }

    /// Document for a non-empty font set. `blocks` may still be empty when
    /// every record was skipped.
    pub fn with_blocks(blocks: Vec<RuleBlock>) -> Self {
        Self {
            blocks: Some(blocks),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_none()
    }

    pub fn blocks(&self) -> &[RuleBlock] {
        self.blocks.as_deref().unwrap_or_default()
    }

    pub fn extend(&mut self, blocks: impl IntoIterator<Item = RuleBlock>) {
        self.blocks.get_or_insert_with(Vec::new).extend(blocks);
    }

    /// Render the full document text.
    pub fn render(&self) -> String {
        let Some(blocks) = &self.blocks else {
            return String::new();
        };

        let mut out = String::from(HEADER);
        for block in blocks {
            // Writing into a String cannot fail.
            let _ = write!(out, "{block}");
        }
        out.push_str(FOOTER);
        out
    }
}
