/// Severity of a logcat line, keyed by its single-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogLevel {
    #[default]
    Silent,
    Verbose,
    Info,
    Debug,
    Warning,
    Error,
    Fatal,
}

impl LogLevel {
    /// Map a logcat severity letter (`S V I D W E F`) to a level.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'S' => Some(Self::Silent),
            'V' => Some(Self::Verbose),
            'I' => Some(Self::Info),
            'D' => Some(Self::Debug),
            'W' => Some(Self::Warning),
            'E' => Some(Self::Error),
            'F' => Some(Self::Fatal),
            _ => None,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::Silent => 'S',
            Self::Verbose => 'V',
            Self::Info => 'I',
            Self::Debug => 'D',
            Self::Warning => 'W',
            Self::Error => 'E',
            Self::Fatal => 'F',
        }
    }
}

/// One parsed logcat line. Lives only as long as it takes to filter and render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// `MM-DD`
    pub date: String,
    /// `HH:MM:SS.mmm`
    pub timestamp: String,
    pub level: LogLevel,
    /// Source tag, trimmed.
    pub tag: String,
    /// Process id with parentheses and padding removed.
    pub pid: String,
    /// Everything after the `):` separator, verbatim.
    pub message: String,
}
