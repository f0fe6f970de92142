//! Validation report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

use crate::utils::plural_s;

/// Which check produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Internal,
    Content,
}

impl Check {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Content => "content",
        }
    }
}

/// A single validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The link or part of the document that failed.
    pub target: String,
    pub reason: String,
}

/// An issue found while checking one route.
#[derive(Debug, Clone)]
pub struct Finding {
    pub check: Check,
    pub route: String,
    pub error: ValidationError,
}

impl Finding {
    pub fn new(
        check: Check,
        route: impl Into<String>,
        target: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            check,
            route: route.into(),
            error: ValidationError {
                target: target.into(),
                reason: reason.into(),
            },
        }
    }
}

/// Validation issues grouped by route
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub internal: BTreeMap<String, Vec<ValidationError>>,
    pub content: BTreeMap<String, Vec<ValidationError>>,
}

impl ValidationReport {
    pub fn add(&mut self, finding: Finding) {
        self.section_mut(finding.check)
            .entry(finding.route)
            .or_default()
            .push(finding.error);
    }

    pub fn section(&self, check: Check) -> &BTreeMap<String, Vec<ValidationError>> {
        match check {
            Check::Internal => &self.internal,
            Check::Content => &self.content,
        }
    }

    fn section_mut(&mut self, check: Check) -> &mut BTreeMap<String, Vec<ValidationError>> {
        match check {
            Check::Internal => &mut self.internal,
            Check::Content => &mut self.content,
        }
    }

    /// Count of routes with issues of this kind.
    pub fn route_count(&self, check: Check) -> usize {
        self.section(check).len()
    }

    /// Total issue count of this kind.
    pub fn error_count(&self, check: Check) -> usize {
        self.section(check).values().map(Vec::len).sum()
    }

    /// Print the full report to stderr (internal -> content).
    pub fn print(&self) {
        for check in [Check::Internal, Check::Content] {
            print_section(check.name(), self.section(check));
        }
    }
}

fn print_section(name: &str, errors: &BTreeMap<String, Vec<ValidationError>>) {
    if errors.is_empty() {
        return;
    }
    eprintln!();

    let route_count = errors.len();
    let error_count: usize = errors.values().map(Vec::len).sum();

    eprintln!(
        "{} {}",
        name.red().bold(),
        format!(
            "({route_count} route{}, {error_count} error{})",
            plural_s(route_count),
            plural_s(error_count)
        )
        .dimmed()
    );

    for (route, errs) in errors {
        eprintln!("{}{}{}", "[".dimmed(), route.cyan(), "]".dimmed());
        for e in errs {
            if e.reason.is_empty() {
                eprintln!("{} {}", "→".red(), e.target);
            } else {
                eprintln!("{} {} {}", "→".red(), e.target, e.reason.dimmed());
            }
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.error_count(Check::Internal) + self.error_count(Check::Content);

        if total == 0 {
            write!(f, "{}", "all checks passed".green())
        } else {
            write!(
                f,
                "{} {} {}",
                "found".dimmed(),
                total.to_string().red().bold(),
                format!("issue{}", plural_s(total)).dimmed()
            )
        }
    }
}
