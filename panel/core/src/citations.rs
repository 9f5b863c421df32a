//! Citation Annotator
//!
//! Turns the page list returned with a reply into a reference block:
//! a fixed label followed by one affordance per cited page.
//!
//! Pages are kept exactly as the backend returned them. Repeated pages are
//! not collapsed, so `[3, 7, 3]` produces three affordances in that order.

use serde::{Deserialize, Serialize};

/// Label shown before the affordances
pub const REFERENCES_LABEL: &str = "References:";

/// Display delimiter between affordances
pub const AFFORDANCE_DELIMITER: &str = ", ";

/// An interactive label bound to one page number
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationAffordance {
    /// The cited page
    pub page: i64,
}

impl CitationAffordance {
    /// Visible label ("Page N")
    pub fn label(&self) -> String {
        format!("Page {}", self.page)
    }

    /// Associated data reported back when the affordance is activated
    pub fn data(&self) -> String {
        self.page.to_string()
    }
}

/// The reference block appended after a rendered reply
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationBlock {
    /// Affordances in citation order
    pub affordances: Vec<CitationAffordance>,
}

impl CitationBlock {
    /// Fixed label
    pub fn label(&self) -> &'static str {
        REFERENCES_LABEL
    }
}

impl std::fmt::Display for CitationBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(REFERENCES_LABEL)?;
        for (i, affordance) in self.affordances.iter().enumerate() {
            let sep = if i == 0 { " " } else { AFFORDANCE_DELIMITER };
            write!(f, "{sep}{}", affordance.label())?;
        }
        Ok(())
    }
}

/// Build the reference block for a list of cited pages
///
/// Returns `None` when nothing was cited.
pub fn annotate(cited_pages: &[i64]) -> Option<CitationBlock> {
    if cited_pages.is_empty() {
        return None;
    }

    Some(CitationBlock {
        affordances: cited_pages
            .iter()
            .map(|&page| CitationAffordance { page })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_annotate_empty_is_none() {
        assert!(annotate(&[]).is_none());
    }

    #[test]
    fn test_annotate_preserves_order_and_duplicates() {
        let block = annotate(&[3, 7, 3]).unwrap();
        let labels: Vec<_> = block.affordances.iter().map(CitationAffordance::label).collect();
        assert_eq!(labels, vec!["Page 3", "Page 7", "Page 3"]);
    }

    #[test]
    fn test_affordance_data_is_page_number() {
        let block = annotate(&[12]).unwrap();
        assert_eq!(block.affordances[0].data(), "12");
    }

    #[test]
    fn test_block_display() {
        let block = annotate(&[4, 9]).unwrap();
        assert_eq!(block.label(), "References:");
        assert_eq!(block.to_string(), "References: Page 4, Page 9");
    }
}
