//! Covenant section locator
//!
//! Finds the covenants article heading and reports which of the three
//! standard financial covenants are mentioned in the window that follows it.
//! Threshold and current values are fixed per covenant kind; nothing numeric
//! is read from the document.

use loanchain_domain::{Covenant, CovenantStatus};
use regex::Regex;
use tracing::debug;

/// Characters scanned after the covenants heading
pub const COVENANT_WINDOW_CHARS: usize = 3000;

/// Locates financial covenants in agreement text
#[derive(Debug, Clone)]
pub struct CovenantLocator {
    heading_regex: Regex,
}

impl CovenantLocator {
    /// Compile the heading rule
    pub fn new() -> Self {
        let heading_regex = Regex::new(r"(?i)(?:ARTICLE|SECTION)\s*(?:V|VI|6|7)\.?\s*COVENANTS")
            .expect("Invalid covenant heading regex");
        Self { heading_regex }
    }

    /// Covenants mentioned in the covenants section
    ///
    /// With no heading, one placeholder leverage covenant is returned so that
    /// every local extraction carries at least one covenant. A heading whose
    /// window names none of the known ratios yields an empty list.
    pub fn locate(&self, text: &str) -> Vec<Covenant> {
        let Some(heading) = self.heading_regex.find(text) else {
            debug!("No covenants heading, using placeholder covenant");
            return vec![placeholder_covenant()];
        };

        let window = window_after(text, heading.end()).to_lowercase();
        let mut covenants = Vec::new();

        if window.contains("leverage ratio") {
            covenants.push(Covenant::financial(
                "cov-lev",
                "Leverage Ratio",
                4.50,
                4.20,
                CovenantStatus::Healthy,
            ));
        }
        if window.contains("interest coverage") {
            covenants.push(Covenant::financial(
                "cov-icr",
                "Interest Coverage Ratio",
                3.00,
                2.85,
                CovenantStatus::Warning,
            ));
        }
        if window.contains("debt service") {
            covenants.push(Covenant::financial(
                "cov-dscr",
                "Debt Service Coverage",
                1.25,
                1.40,
                CovenantStatus::Healthy,
            ));
        }

        debug!("Covenants section names {} known covenants", covenants.len());
        covenants
    }
}

impl Default for CovenantLocator {
    fn default() -> Self {
        Self::new()
    }
}

fn placeholder_covenant() -> Covenant {
    Covenant::financial("c1", "Leverage Ratio", 4.0, 3.8, CovenantStatus::Healthy)
}

/// Up to `COVENANT_WINDOW_CHARS` characters starting at byte offset `start`
fn window_after(text: &str, start: usize) -> &str {
    let rest = &text[start..];
    match rest.char_indices().nth(COVENANT_WINDOW_CHARS) {
        Some((end, _)) => &rest[..end],
        None => rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(covenants: &[Covenant]) -> Vec<&str> {
        covenants.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_no_heading_gives_placeholder() {
        let covenants = CovenantLocator::new().locate("Leverage Ratio appears but no heading");
        assert_eq!(covenants.len(), 1);
        assert_eq!(covenants[0].id, "c1");
        assert_eq!(covenants[0].name, "Leverage Ratio");
        assert_eq!(covenants[0].threshold, 4.0);
        assert_eq!(covenants[0].current_value, 3.8);
        assert_eq!(covenants[0].status, CovenantStatus::Healthy);
    }

    #[test]
    fn test_all_three_in_fixed_order() {
        let text = "ARTICLE VI COVENANTS. Debt Service coverage shall exceed... \
                    the Interest Coverage Ratio shall not be less than... \
                    the Consolidated Leverage Ratio shall not exceed...";
        let covenants = CovenantLocator::new().locate(text);
        assert_eq!(ids(&covenants), vec!["cov-lev", "cov-icr", "cov-dscr"]);
        assert_eq!(covenants[1].status, CovenantStatus::Warning);
        assert!(covenants.iter().all(|c| c.covenant_type == "Financial"));
    }

    #[test]
    fn test_heading_variants() {
        let locator = CovenantLocator::new();
        for heading in [
            "Section 7. Covenants",
            "ARTICLE V COVENANTS",
            "article 6 covenants",
            "SECTION VI.COVENANTS",
        ] {
            let text = format!("{} leverage ratio", heading);
            assert_eq!(ids(&locator.locate(&text)), vec!["cov-lev"], "heading: {}", heading);
        }
    }

    #[test]
    fn test_heading_without_known_ratios_is_empty() {
        let text = "ARTICLE VI COVENANTS. The Borrower shall maintain insurance.";
        assert!(CovenantLocator::new().locate(text).is_empty());
    }

    #[test]
    fn test_mentions_before_heading_are_ignored() {
        // VII is not a recognised article number
        let text = "Interest Coverage defined here. ARTICLE VII COVENANTS leverage ratio";
        let covenants = CovenantLocator::new().locate(text);
        assert_eq!(ids(&covenants), vec!["c1"]);

        let text = "Interest Coverage defined here. SECTION 7 COVENANTS leverage ratio";
        assert_eq!(ids(&CovenantLocator::new().locate(text)), vec!["cov-lev"]);
    }

    #[test]
    fn test_window_is_bounded() {
        let filler = "x".repeat(COVENANT_WINDOW_CHARS);
        let text = format!("ARTICLE VI COVENANTS{} debt service", filler);
        assert!(CovenantLocator::new().locate(&text).is_empty());

        let text = format!("ARTICLE VI COVENANTS debt service{}", filler);
        assert_eq!(ids(&CovenantLocator::new().locate(&text)), vec!["cov-dscr"]);
    }

    #[test]
    fn test_window_counts_characters_not_bytes() {
        let text = "ARTICLE VI COVENANTS é leverage ratio";
        let window = window_after(text, 20);
        assert!(window.ends_with("leverage ratio"));

        let multibyte = "é".repeat(COVENANT_WINDOW_CHARS + 10);
        assert_eq!(window_after(&multibyte, 0).chars().count(), COVENANT_WINDOW_CHARS);
    }
}
