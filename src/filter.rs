use crate::record::LogRecord;
use crate::resolve::ProcessResolver;

/// Optional process-id filter, fixed for the lifetime of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessFilter {
    target: Option<String>,
}

impl ProcessFilter {
    /// A filter that lets every record through.
    pub const fn disabled() -> Self {
        Self { target: None }
    }

    /// Only emit records whose pid equals `pid` (after trimming).
    pub fn for_pid(pid: &str) -> Self {
        Self {
            target: Some(pid.trim().to_string()),
        }
    }

    /// Build from the result of a pid lookup; `None` disables filtering.
    pub fn from_lookup(pid: Option<String>) -> Self {
        pid.map_or_else(Self::disabled, |p| Self::for_pid(&p))
    }

    /// Resolve `package` to a pid once at startup. No package, or no match, disables filtering.
    pub fn resolve(package: Option<&str>, resolver: &dyn ProcessResolver) -> Self {
        Self::from_lookup(package.and_then(|p| resolver.resolve(p)))
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn should_emit(&self, record: &LogRecord) -> bool {
        self.target.as_deref().is_none_or(|t| record.pid == t)
    }
}
