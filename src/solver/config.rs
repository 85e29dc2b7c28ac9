//! Solver command configuration

use std::path::PathBuf;

/// Program and arguments used to launch one solver process.
///
/// The document is always delivered on stdin, so the arguments must tell the
/// solver to read from there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Default for SolverCommand {
    fn default() -> Self {
        Self {
            program: PathBuf::from("z3"),
            args: vec!["-in".to_string(), "-smt2".to_string()],
        }
    }
}

impl SolverCommand {
    /// A program launched without arguments
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Builder: replace the program, keep the arguments
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Builder: replace the argument list
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Command line for log messages
    pub fn display(&self) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_z3_on_stdin() {
        let command = SolverCommand::default();
        assert_eq!(command.display(), "z3 -in -smt2");
    }

    #[test]
    fn test_builders() {
        let command = SolverCommand::default()
            .with_program("/opt/z3/bin/z3")
            .with_args(["-in", "-smt2", "-T:5"]);
        assert_eq!(command.program, PathBuf::from("/opt/z3/bin/z3"));
        assert_eq!(command.args.len(), 3);

        let bare = SolverCommand::new("./fake.sh");
        assert!(bare.args.is_empty());
        assert_eq!(bare.display(), "./fake.sh");
    }
}
