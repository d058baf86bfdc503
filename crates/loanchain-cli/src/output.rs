//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use loanchain_domain::{CovenantStatus, Deal, DealRecord};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format one deal.
    pub fn format_deal(&self, deal: &Deal) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(deal)?),
            OutputFormat::Table => Ok(self.format_deal_table(deal)),
            OutputFormat::Quiet => Ok(deal.agreement.id.to_string()),
        }
    }

    /// Format saved records, in the order given.
    pub fn format_records(&self, records: &[DealRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            OutputFormat::Table => Ok(self.format_records_table(records)),
            OutputFormat::Quiet => Ok(records
                .iter()
                .map(|r| r.deal.agreement.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_deal_table(&self, deal: &Deal) -> String {
        let agreement = &deal.agreement;
        let mut sections = Vec::new();

        let mut terms = Builder::default();
        terms.push_record(["Field", "Value"]);
        terms.push_record(["Agreement", agreement.name.as_str()]);
        terms.push_record(["Borrower", agreement.borrower.as_str()]);
        terms.push_record(["Facility", format_currency(agreement.facility_amount).as_str()]);
        terms.push_record(["Interest", agreement.interest_type.as_str()]);
        terms.push_record(["Maturity", agreement.maturity_date.to_string().as_str()]);
        terms.push_record(["ID", agreement.id.to_string().as_str()]);
        sections.push(style_table(terms));

        if deal.covenants.is_empty() {
            sections.push(self.colorize("No covenants found.", "yellow"));
        } else {
            let mut covenants = Builder::default();
            covenants.push_record(["Covenant", "Threshold", "Current", "Status"]);
            for covenant in &deal.covenants {
                covenants.push_record([
                    covenant.name.clone(),
                    format!("{:.2}x", covenant.threshold),
                    format!("{:.2}x", covenant.current_value),
                    self.status_label(covenant.status),
                ]);
            }
            sections.push(style_table(covenants));
        }

        let mut participants = Builder::default();
        participants.push_record(["Participant", "Role", "Exposure"]);
        for participant in &deal.participants {
            participants.push_record([
                participant.name.clone(),
                participant.role.to_string(),
                format_currency(participant.exposure),
            ]);
        }
        sections.push(style_table(participants));

        if let Some(flowchart) = &deal.flowchart {
            sections.push(self.info(&format!(
                "Flowchart: {} nodes, {} edges",
                flowchart.nodes.len(),
                flowchart.edges.len()
            )));
        }

        sections.join("\n\n")
    }

    fn format_records_table(&self, records: &[DealRecord]) -> String {
        if records.is_empty() {
            return self.colorize("No saved deals.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Saved", "Borrower", "Facility", "Maturity", "Covenants"]);

        for (idx, record) in records.iter().enumerate() {
            let agreement = &record.deal.agreement;
            builder.push_record([
                (idx + 1).to_string(),
                record.saved_at.format("%Y-%m-%d %H:%M").to_string(),
                agreement.borrower.clone(),
                format_currency(agreement.facility_amount),
                agreement.maturity_date.to_string(),
                record.deal.covenants.len().to_string(),
            ]);
        }

        style_table(builder)
    }

    fn status_label(&self, status: CovenantStatus) -> String {
        let color = match status {
            CovenantStatus::Healthy => "green",
            CovenantStatus::Warning => "yellow",
            CovenantStatus::Breach => "red",
        };
        self.colorize(status.as_str(), color)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn style_table(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

/// Whole dollars with thousands separators, e.g. `$1,200,000,000`.
pub fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${}", grouped)
}
