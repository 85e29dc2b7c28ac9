//! Solver verdicts

use std::fmt;

/// What a solver run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Sat,
    Unsat,
    Unknown,
    /// The run exceeded its wall-clock limit and was killed
    Timeout,
    /// Output that is none of the recognised tokens
    Other(String),
    /// The process could not be driven at all
    Failed(String),
}

impl Verdict {
    /// Interpret captured stdout. Surrounding whitespace and line breaks are
    /// ignored.
    pub fn parse(stdout: &str) -> Self {
        match stdout.trim() {
            "sat" => Verdict::Sat,
            "unsat" => Verdict::Unsat,
            "unknown" => Verdict::Unknown,
            "timeout" => Verdict::Timeout,
            other => Verdict::Other(other.to_string()),
        }
    }

    /// True for `sat` and `unsat`
    pub fn is_definite(&self) -> bool {
        matches!(self, Verdict::Sat | Verdict::Unsat)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Sat => write!(f, "sat"),
            Verdict::Unsat => write!(f, "unsat"),
            Verdict::Unknown => write!(f, "unknown"),
            Verdict::Timeout => write!(f, "timeout"),
            Verdict::Other(text) if text.is_empty() => write!(f, "<no output>"),
            Verdict::Other(text) => write!(f, "{text}"),
            Verdict::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!(Verdict::parse("sat\n"), Verdict::Sat);
        assert_eq!(Verdict::parse("  unsat \r\n"), Verdict::Unsat);
        assert_eq!(Verdict::parse("unknown"), Verdict::Unknown);
        assert_eq!(Verdict::parse("timeout\n"), Verdict::Timeout);
    }

    #[test]
    fn test_parse_other() {
        let verdict = Verdict::parse("(error \"line 3\")\nsat\n");
        assert!(matches!(verdict, Verdict::Other(ref text) if text.starts_with("(error")));
        assert!(!verdict.is_definite());
        assert_eq!(Verdict::parse("").to_string(), "<no output>");
    }

    #[test]
    fn test_display_round_trips_tokens() {
        for verdict in [Verdict::Sat, Verdict::Unsat, Verdict::Unknown] {
            assert_eq!(Verdict::parse(&verdict.to_string()), verdict);
        }
    }
}
