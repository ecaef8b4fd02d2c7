//! `logsieve rules` command handler
//!
//! Renders the built-in extraction rule tables. These are compiled into
//! the binary, so no configuration file is needed.

use std::io::Write;

use serde::Serialize;

use logsieve_audit::rules::{
    ALERT_FIELD_RULES, ALERT_LINE_PREFIX, AlertField, BOUNDARY_MARKER, FIELD_RULES, SECTION_CLOSE,
    SECTION_INDEX, SECTION_OPEN, TAG_PATTERN,
};

use crate::cli::{RulesAction, RulesArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `rules` command.
pub async fn execute(args: RulesArgs, writer: &OutputWriter) -> Result<(), CliError> {
    match args.action {
        RulesAction::List { field } => execute_list(field, writer),
        RulesAction::Alerts => execute_alerts(writer),
        RulesAction::Markers => execute_markers(writer),
    }
}

fn execute_list(field_filter: Option<String>, writer: &OutputWriter) -> Result<(), CliError> {
    let rules: Vec<FieldRuleEntry> = FIELD_RULES
        .iter()
        .filter(|rule| match &field_filter {
            Some(name) => rule.field.name() == name,
            None => true,
        })
        .map(|rule| FieldRuleEntry {
            field: rule.field.name().to_owned(),
            policy: rule.policy.name().to_owned(),
            patterns: rule.patterns.iter().map(|p| (*p).to_owned()).collect(),
        })
        .collect();

    let report = FieldRuleReport {
        total: rules.len(),
        rules,
    };

    writer.render(&report)?;

    Ok(())
}

fn execute_alerts(writer: &OutputWriter) -> Result<(), CliError> {
    let report = AlertRuleReport {
        line_prefix: ALERT_LINE_PREFIX.to_owned(),
        fields: ALERT_FIELD_RULES
            .iter()
            .map(|rule| AlertRuleEntry {
                field: rule.field.name().to_owned(),
                required: matches!(rule.field, AlertField::Id | AlertField::Msg),
                pattern: rule.pattern.to_owned(),
            })
            .collect(),
        tag_pattern: TAG_PATTERN.to_owned(),
    };

    writer.render(&report)?;

    Ok(())
}

fn execute_markers(writer: &OutputWriter) -> Result<(), CliError> {
    let report = MarkerReport {
        boundary: BOUNDARY_MARKER.to_owned(),
        open_section: SECTION_OPEN.to_owned(),
        close_section: SECTION_CLOSE.to_owned(),
        section_index: SECTION_INDEX,
        alert_prefix: ALERT_LINE_PREFIX.to_owned(),
    };

    writer.render(&report)?;

    Ok(())
}

/// Transaction field rule listing.
#[derive(Serialize)]
pub struct FieldRuleReport {
    pub total: usize,
    pub rules: Vec<FieldRuleEntry>,
}

#[derive(Serialize)]
pub struct FieldRuleEntry {
    pub field: String,
    pub policy: String,
    pub patterns: Vec<String>,
}

impl Render for FieldRuleReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "Transaction Field Rules ({} total)",
            self.total.to_string().bold()
        )?;
        writeln!(w)?;
        writeln!(w, "{:<18} {:<12} Patterns", "Field", "Policy")?;
        writeln!(w, "{}", "-".repeat(70))?;

        for rule in &self.rules {
            let mut patterns = rule.patterns.iter();
            let first = patterns.next().map(String::as_str).unwrap_or("");
            writeln!(w, "{:<18} {:<12} {}", rule.field, rule.policy, first)?;
            // Fallback patterns are tried in order after the first one
            for pattern in patterns {
                writeln!(w, "{:<18} {:<12} {}", "", "", pattern)?;
            }
        }

        Ok(())
    }
}

/// Alert line rule listing.
#[derive(Serialize)]
pub struct AlertRuleReport {
    pub line_prefix: String,
    pub fields: Vec<AlertRuleEntry>,
    pub tag_pattern: String,
}

#[derive(Serialize)]
pub struct AlertRuleEntry {
    pub field: String,
    pub required: bool,
    pub pattern: String,
}

impl Render for AlertRuleReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Alert Line Rules (prefix: {})", self.line_prefix.bold())?;
        writeln!(w)?;
        writeln!(w, "{:<12} {:<10} Pattern", "Field", "Required")?;
        writeln!(w, "{}", "-".repeat(60))?;

        for field in &self.fields {
            let required = if field.required {
                "yes".green()
            } else {
                "no".normal()
            };
            writeln!(w, "{:<12} {:<10} {}", field.field, required, field.pattern)?;
        }

        writeln!(w)?;
        writeln!(w, "Tags are collected with: {}", self.tag_pattern)?;
        writeln!(w, "Lines missing a required field contribute no alert.")?;

        Ok(())
    }
}

/// Block boundary marker constants.
#[derive(Serialize)]
pub struct MarkerReport {
    pub boundary: String,
    pub open_section: String,
    pub close_section: String,
    pub section_index: usize,
    pub alert_prefix: String,
}

impl Render for MarkerReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "{}", "Block Boundary Markers".bold())?;
        writeln!(w)?;
        writeln!(w, "  Marker prefix:  {}", self.boundary)?;
        writeln!(
            w,
            "  Open section:   {} (part {} after splitting on the prefix)",
            self.open_section, self.section_index
        )?;
        writeln!(w, "  Close section:  {}", self.close_section)?;
        writeln!(w, "  Alert prefix:   {}", self.alert_prefix)?;

        Ok(())
    }
}
