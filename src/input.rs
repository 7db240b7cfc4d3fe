//! Loading of [`AutomatonDefinition`]s from their line-oriented textual description.
//!
//! The format consists of four header lines followed by the transition records:
//! ```text
//! a b &        <- alphabet symbols, must include the epsilon marker
//! q0 q1        <- state labels
//! q0           <- initial state, a single token
//! q1           <- final states, may be empty
//! q0 a q0      <- one transition per line: <origin> <symbol> <destination>
//! q0 b q1
//! ```
//! Tokens are separated by arbitrary whitespace. Blank lines after the header are not
//! transition records at all and are skipped, so they never produce a
//! [`DefinitionError::MalformedTransitionRecord`]. Any other line after the header must consist
//! of exactly three fields. A missing final states line is treated like an empty one.
use std::{fs::File, io::BufRead, io::BufReader, path::Path, str::FromStr};

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    alphabet::DEFAULT_EPSILON,
    definition::{
        AutomatonDefinition, DefinitionBuilder, DefinitionError, Field, Location,
        TransitionRecord,
    },
};

/// Failure when loading a definition from some source. Problems with the source itself are
/// kept apart from problems with its content.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read automaton definition: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid automaton definition: {0}")]
    Definition(#[from] DefinitionError),
}

/// Reads definitions in the textual format described in the [module documentation](self).
/// The only thing that can be configured is the token that acts as epsilon marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionReader {
    epsilon: String,
}

impl Default for DefinitionReader {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON.to_string(),
        }
    }
}

impl DefinitionReader {
    pub fn with_epsilon<S: Into<String>>(mut self, epsilon: S) -> Self {
        self.epsilon = epsilon.into();
        self
    }

    /// Parses a definition from the given text.
    pub fn parse(&self, text: &str) -> Result<AutomatonDefinition, DefinitionError> {
        self.read_lines(text.lines().map(|line| Ok(line.to_string())))
    }

    /// Reads a definition from the given reader, consuming it until the end.
    pub fn read<R: BufRead>(&self, reader: R) -> Result<AutomatonDefinition, LoadError> {
        self.read_lines(reader.lines().map(|line| line.map_err(LoadError::from)))
    }

    /// Opens the file at `path` and reads a definition from it.
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<AutomatonDefinition, LoadError> {
        let path = path.as_ref();
        debug!("loading automaton definition from {}", path.display());
        let file = File::open(path)?;
        self.read(BufReader::new(file))
    }

    fn read_lines<I, E>(&self, lines: I) -> Result<AutomatonDefinition, E>
    where
        I: IntoIterator<Item = Result<String, E>>,
        E: From<DefinitionError>,
    {
        let mut lines = lines.into_iter();
        let mut header = |field: Field| -> Result<String, E> {
            lines
                .next()
                .transpose()?
                .ok_or_else(|| DefinitionError::MissingField(field).into())
        };

        let alphabet = header(Field::Alphabet)?;
        let states = header(Field::States)?;
        let initial = header(Field::InitialState)?;
        let initial = match initial.split_whitespace().collect::<Vec<_>>()[..] {
            [] => return Err(DefinitionError::MissingField(Field::InitialState).into()),
            [single] => single.to_string(),
            _ => {
                let found = initial.trim().to_string();
                return Err(DefinitionError::MalformedInitialState(found).into());
            }
        };
        let finals = lines.next().transpose()?.unwrap_or_default();

        let mut builder = DefinitionBuilder::default()
            .with_epsilon(self.epsilon.as_str())
            .with_alphabet(alphabet.split_whitespace())
            .with_states(states.split_whitespace())
            .with_initial(initial)
            .with_final_states(finals.split_whitespace());

        for (idx, line) in lines.enumerate() {
            let line = line?;
            // the four header lines precede the records and line numbers start at 1
            let location = Location::Line(idx + 5);
            if line.trim().is_empty() {
                trace!("{location}: skipping blank line");
                continue;
            }
            let record = TransitionRecord::parse(&line, location)?;
            trace!("{location}: read transition record `{}`", line.trim());
            builder.push_transition(record);
        }

        Ok(builder.build()?)
    }
}

impl FromStr for AutomatonDefinition {
    type Err = DefinitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DefinitionReader::default().parse(s)
    }
}

/// Reads a definition with the default epsilon marker from the given reader.
pub fn from_reader<R: BufRead>(reader: R) -> Result<AutomatonDefinition, LoadError> {
    DefinitionReader::default().read(reader)
}

/// Reads a definition with the default epsilon marker from the file at `path`.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<AutomatonDefinition, LoadError> {
    DefinitionReader::default().open(path)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::prelude::*;

    const SIMPLE: &str = "a b &\nq0 q1\nq0\nq1\nq0 a q0\nq0 b q1\n";

    #[test_log::test]
    fn parse_simple_definition() {
        let definition: AutomatonDefinition = SIMPLE.parse().unwrap();
        assert_eq!(definition.alphabet().symbols().collect::<Vec<_>>(), vec!["a", "b", "&"]);
        assert_eq!(definition.states().collect::<Vec<_>>(), vec!["q0", "q1"]);
        assert_eq!(definition.initial(), "q0");
        assert_eq!(definition.final_states().collect::<Vec<_>>(), vec!["q1"]);
        assert_eq!(
            definition.transitions().collect::<Vec<_>>(),
            vec![("q0", "a", "q0"), ("q0", "b", "q1")]
        );
    }

    #[test_log::test]
    fn whitespace_and_blank_lines() {
        let text = "  a\tb  & \r\nq0 q1\r\n  q0 \r\n\r\n\nq0   a q0\n   \nq0 b\tq1";
        let definition: AutomatonDefinition = text.parse().unwrap();
        assert_eq!(definition.final_states().count(), 0);
        assert_eq!(definition.transition_relation().len(), 2);
    }

    #[test_log::test]
    fn missing_final_line_means_no_final_states() {
        let definition: AutomatonDefinition = "a &\nq0\nq0".parse().unwrap();
        assert_eq!(definition.final_states().count(), 0);
        assert_eq!(definition.transition_relation().len(), 0);
    }

    #[test_log::test]
    fn missing_header_lines() {
        assert_eq!(
            "".parse::<AutomatonDefinition>(),
            Err(DefinitionError::MissingField(Field::Alphabet))
        );
        assert_eq!(
            "a &".parse::<AutomatonDefinition>(),
            Err(DefinitionError::MissingField(Field::States))
        );
        assert_eq!(
            "a &\nq0".parse::<AutomatonDefinition>(),
            Err(DefinitionError::MissingField(Field::InitialState))
        );
        assert_eq!(
            "a &\nq0\n   \n".parse::<AutomatonDefinition>(),
            Err(DefinitionError::MissingField(Field::InitialState))
        );
    }

    #[test_log::test]
    fn initial_state_must_be_single_token() {
        assert_eq!(
            "a &\nq0 q1\nq0 q1\n\n".parse::<AutomatonDefinition>(),
            Err(DefinitionError::MalformedInitialState("q0 q1".into()))
        );
    }

    #[test_log::test]
    fn errors_carry_line_numbers() {
        let text = "a b &\nq0 q1\nq0\nq1\nq0 a q0\n\nq0 b\n";
        assert_eq!(
            text.parse::<AutomatonDefinition>(),
            Err(DefinitionError::MalformedTransitionRecord {
                location: Location::Line(7),
                record: "q0 b".into()
            })
        );

        let text = "a b &\nq0 q1\nq0\nq1\nq0 a q0\nq0 c q1\n";
        assert_eq!(
            text.parse::<AutomatonDefinition>(),
            Err(DefinitionError::UnknownTransitionSymbol {
                location: Location::Line(6),
                symbol: "c".into()
            })
        );

        let text = "a b &\nq0 q1\nq0\nq1\nq2 a q0\n";
        assert_eq!(
            text.parse::<AutomatonDefinition>(),
            Err(DefinitionError::UnknownTransitionState {
                location: Location::Line(5),
                endpoint: Endpoint::Origin,
                state: "q2".into()
            })
        );
    }

    #[test_log::test]
    fn header_violations() {
        assert_eq!(
            "a b\nq0\nq0\n".parse::<AutomatonDefinition>(),
            Err(DefinitionError::MissingEpsilonSymbol("&".into()))
        );
        assert_eq!(
            "a &\nq0\nq1\n".parse::<AutomatonDefinition>(),
            Err(DefinitionError::UnknownInitialState("q1".into()))
        );
        assert_eq!(
            "a &\nq0\nq0\nq0 q3\n".parse::<AutomatonDefinition>(),
            Err(DefinitionError::UnknownFinalState("q3".into()))
        );
    }

    #[test_log::test]
    fn custom_epsilon_marker() {
        let reader = DefinitionReader::default().with_epsilon("eps");
        let definition = reader.parse("a eps\nq0\nq0\nq0\nq0 eps q0").unwrap();
        assert_eq!(definition.epsilon(), "eps");
        assert!(reader.parse("a &\nq0\nq0\n").is_err());
    }

    #[test_log::test]
    fn read_from_reader() {
        let definition = from_reader(Cursor::new(SIMPLE)).unwrap();
        assert_eq!(definition.size(), 2);

        let err = from_reader(Cursor::new("a b\nq0\nq0\n")).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Definition(DefinitionError::MissingEpsilonSymbol(_))
        ));
    }

    #[test_log::test]
    fn read_from_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/automaton.txt");
        let definition = from_path(path).unwrap();
        assert_eq!(definition.size(), 3);
        assert_eq!(definition.transition_relation().len(), 5);
        assert_eq!(definition.evaluate("aab"), Classification::Accepted);
        assert_eq!(definition.evaluate("abb"), Classification::Rejected);
        assert_eq!(definition.evaluate("abc"), Classification::Invalid);
    }

    #[test_log::test]
    fn missing_file_is_an_io_error() {
        let err = from_path("/this/path/does/not/exist/automaton.txt").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
        assert!(err.to_string().starts_with("could not read automaton definition"));
    }

    #[test_log::test]
    fn invalid_utf8_is_an_io_error() {
        let err = from_reader(Cursor::new(vec![b'a', b' ', 0xff, b'\n'])).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
