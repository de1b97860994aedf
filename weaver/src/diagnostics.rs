use std::fmt;
use std::slice;

/// Severity of a recorded diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// One structured record produced during a weave pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Behaviour the record belongs to.
    pub type_name: String,
    /// Offending method or field, when the record concerns one member.
    pub member: Option<String>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        match &self.member {
            Some(member) => write!(
                f,
                "{}: {}.{}: {}",
                severity, self.type_name, member, self.message
            ),
            None => write!(f, "{}: {}: {}", severity, self.type_name, self.message),
        }
    }
}

/// Ordered accumulator for every record a weave pass produces.
///
/// Recording never fails and nothing is ever discarded; a nonzero error
/// count marks the whole weave failed without anything being thrown
/// across pass boundaries.
#[derive(Debug, Default)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn record(&mut self, diagnostic: Diagnostic) {
        self.records.push(diagnostic);
    }

    pub fn error(&mut self, type_name: &str, member: Option<&str>, message: String) {
        self.record(Diagnostic {
            severity: Severity::Error,
            type_name: type_name.to_string(),
            member: member.map(str::to_string),
            message,
        });
    }

    pub fn warning(&mut self, type_name: &str, member: Option<&str>, message: String) {
        self.record(Diagnostic {
            severity: Severity::Warning,
            type_name: type_name.to_string(),
            member: member.map(str::to_string),
            message,
        });
    }

    pub fn has_errors(&self) -> bool {
        self.records
            .iter()
            .any(|record| record.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.severity == Severity::Warning)
            .count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in the order they were produced.
    pub fn iter(&self) -> slice::Iter<'_, Diagnostic> {
        self.records.iter()
    }
}
