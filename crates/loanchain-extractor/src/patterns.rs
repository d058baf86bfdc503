//! Pattern rules for headline deal terms
//!
//! Four independent rules run over the flattened document text. Each rule
//! falls back to its own default on a miss, so one missing term never blocks
//! another.

use chrono::{Local, Months, NaiveDate};
use loanchain_domain::AgreementMetadata;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use tracing::debug;

/// Facility amount used when no currency token is found
pub const DEFAULT_FACILITY_AMOUNT: u64 = 100_000_000;

/// Borrower used when no borrower clause is found
pub const UNKNOWN_BORROWER: &str = "Unknown Borrower";

/// Rate description used when no margin clause is found
pub const DEFAULT_INTEREST_TYPE: &str = "SOFR + 350bps";

/// Borrower names are cut to this many characters
pub const BORROWER_NAME_MAX_CHARS: usize = 50;

/// Default maturity is this many months after today
pub const DEFAULT_MATURITY_MONTHS: u32 = 60;

/// Terms found by the pattern rules, every field filled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTerms {
    /// Borrower name
    pub borrower: String,
    /// Facility amount in whole dollars
    pub facility_amount: u64,
    /// Rate description
    pub interest_type: String,
    /// Maturity date
    pub maturity_date: NaiveDate,
}

impl From<ExtractedTerms> for AgreementMetadata {
    fn from(terms: ExtractedTerms) -> Self {
        AgreementMetadata {
            borrower: Some(terms.borrower),
            facility_amount: Some(terms.facility_amount),
            interest_type: Some(terms.interest_type),
            maturity_date: Some(terms.maturity_date),
        }
    }
}

/// Compiled pattern rules for headline terms
#[derive(Debug, Clone)]
pub struct PatternEngine {
    amount_regex: Regex,
    borrower_regex: Regex,
    rate_regex: Regex,
    maturity_regex: Regex,
}

impl PatternEngine {
    /// Compile the rule set
    pub fn new() -> Self {
        // "$250,000,000", "$50 million", "$1.2 billion"
        let amount_regex = Regex::new(r"(?i)\$\s*[0-9,]+(?:\.[0-9]+)?\s*(?:million|billion)?")
            .expect("Invalid facility amount regex");

        // Case-sensitive: the name must start with a capital. The greedy class
        // runs to the last comma or " and" it can reach.
        let borrower_regex = Regex::new(
            r"(?:Borrower|Company|Credit Parties)\s*[:\-]\s*([A-Z][a-zA-Z0-9\s,.]+)(?:,|\s+and)",
        )
        .expect("Invalid borrower regex");

        // Lazy gap on one line between the label and the benchmark
        let rate_regex = Regex::new(
            r"(?i)(?:Interest Rate|Margin|Applicable Rate).*?(?:SOFR|LIBOR|Base Rate)\s*(?:plus|\+)\s*([0-9.]+)\s*%",
        )
        .expect("Invalid interest rate regex");

        let maturity_regex =
            Regex::new(r"(?:Maturity Date|Termination Date).*?([A-Z][a-z]+ [0-9]{1,2}, [0-9]{4})")
                .expect("Invalid maturity date regex");

        Self {
            amount_regex,
            borrower_regex,
            rate_regex,
            maturity_regex,
        }
    }

    /// Run every rule, defaulting the maturity relative to the local date
    pub fn extract(&self, text: &str) -> ExtractedTerms {
        self.extract_as_of(text, Local::now().date_naive())
    }

    /// Run every rule with an explicit "today" for the maturity default
    pub fn extract_as_of(&self, text: &str, today: NaiveDate) -> ExtractedTerms {
        ExtractedTerms {
            borrower: self.borrower(text),
            facility_amount: self.facility_amount(text),
            interest_type: self.interest_type(text),
            maturity_date: self.maturity_date(text, today),
        }
    }

    /// First currency token, scaled by its unit word
    pub fn facility_amount(&self, text: &str) -> u64 {
        match self.amount_regex.find(text) {
            Some(m) => parse_amount(m.as_str()).unwrap_or_else(|| {
                debug!("Currency token '{}' did not parse, using default", m.as_str());
                DEFAULT_FACILITY_AMOUNT
            }),
            None => DEFAULT_FACILITY_AMOUNT,
        }
    }

    /// Name following the first borrower label
    pub fn borrower(&self, text: &str) -> String {
        self.borrower_regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().chars().take(BORROWER_NAME_MAX_CHARS).collect())
            .unwrap_or_else(|| UNKNOWN_BORROWER.to_string())
    }

    /// Margin over the benchmark, expressed in basis points
    pub fn interest_type(&self, text: &str) -> String {
        self.rate_regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| percent_to_bps(m.as_str()))
            .map(|bps| format!("SOFR + {}bps", bps))
            .unwrap_or_else(|| DEFAULT_INTEREST_TYPE.to_string())
    }

    /// Date following the first maturity label, else five years from `today`
    pub fn maturity_date(&self, text: &str, today: NaiveDate) -> NaiveDate {
        self.maturity_regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| parse_long_date(m.as_str()))
            .unwrap_or_else(|| default_maturity(today))
    }
}

impl Default for PatternEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a matched currency token into whole dollars
///
/// Keeps only digits and the decimal point, then scales by "billion" or
/// "million" found anywhere in the token.
pub(crate) fn parse_amount(token: &str) -> Option<u64> {
    let numeric: String = token
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let value = Decimal::from_str(&numeric).ok()?;

    let lowered = token.to_lowercase();
    let scale = if lowered.contains("billion") {
        Decimal::from(1_000_000_000u64)
    } else if lowered.contains("million") {
        Decimal::from(1_000_000u64)
    } else {
        Decimal::ONE
    };

    value
        .checked_mul(scale)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
}

/// Convert a percentage capture ("3.50") into whole basis points (350)
///
/// Only the leading numeric prefix counts, so "3.5.1" reads as 3.5.
pub(crate) fn percent_to_bps(capture: &str) -> Option<i64> {
    let mut seen_point = false;
    let prefix: String = capture
        .chars()
        .take_while(|c| {
            if *c == '.' && !seen_point {
                seen_point = true;
                true
            } else {
                c.is_ascii_digit()
            }
        })
        .collect();

    let percent = Decimal::from_str(prefix.trim_end_matches('.')).ok()?;
    percent
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Parse "December 31, 2029" style dates
pub(crate) fn parse_long_date(token: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(token.trim(), "%B %d, %Y").ok()
}

fn default_maturity(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_months(Months::new(DEFAULT_MATURITY_MONTHS))
        .unwrap_or(today)
}
