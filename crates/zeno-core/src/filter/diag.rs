///
/// Filter diagnostics boundary.
///
/// Diagnostics are optional, injected by the caller, and must not
/// affect evaluation semantics: a predicate that produces a diagnostic
/// still evaluates to false rather than failing the pass.
///

///
/// FilterDiagnostic
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FilterDiagnostic {
    /// A REGEX predicate's pattern failed to compile. Reported once per
    /// pattern per filter pass.
    BadRegex {
        column: String,
        pattern: String,
        message: String,
    },
}

///
/// DiagnosticSink
///

pub trait DiagnosticSink {
    fn on_diagnostic(&self, diagnostic: FilterDiagnostic);
}

///
/// NullSink
///
/// Default sink that drops everything.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn on_diagnostic(&self, _diagnostic: FilterDiagnostic) {}
}

///
/// CollectSink
///
/// Buffers diagnostics for the caller to surface after a pass, e.g. as
/// an error badge on a slice.
///

#[derive(Debug, Default)]
pub struct CollectSink {
    diagnostics: std::cell::RefCell<Vec<FilterDiagnostic>>,
}

impl CollectSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn take(&self) -> Vec<FilterDiagnostic> {
        self.diagnostics.take()
    }
}

impl DiagnosticSink for CollectSink {
    fn on_diagnostic(&self, diagnostic: FilterDiagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}
