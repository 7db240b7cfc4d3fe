//! Evaluation of words against an [`AutomatonDefinition`].
//!
//! Evaluation simulates the (potentially non-deterministic) automaton by tracking the set of
//! all states that are possible after each prefix of the word, see [`ActiveStateSet`]. A word
//! is first checked against the alphabet, words that contain foreign symbols are classified
//! as [`Classification::Invalid`] without looking at any transition. Otherwise, the word is
//! read symbol by symbol and rejected as soon as no active state has a transition on the
//! current symbol. Once the word is exhausted, it is accepted if at least one active state
//! is final.
//!
//! Each evaluation only reads the definition, so any number of evaluations may run at the
//! same time on one shared definition.
use std::fmt::Display;

use itertools::Either;
use tracing::trace;

use crate::{
    definition::AutomatonDefinition,
    id::{StateId, SymbolId},
};

mod active;
pub use active::ActiveStateSet;

mod run;
pub use run::{Reason, Run};

mod batch;
pub use batch::Classifications;

/// The outcome of evaluating a word. These are results, not errors: every word gets exactly one
/// of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Classification {
    /// The word leads to at least one final state.
    Accepted,
    /// The word only consists of alphabet symbols, but no final state can be reached.
    Rejected,
    /// The word contains a symbol that is not part of the alphabet.
    Invalid,
}

impl Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Accepted => write!(f, "ACCEPTED"),
            Classification::Rejected => write!(f, "REJECTED"),
            Classification::Invalid => write!(f, "INVALID"),
        }
    }
}

/// Determines how a word is split into symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tokenization {
    /// Every character of the word is one symbol.
    #[default]
    Chars,
    /// The word is a whitespace separated list of symbols, which allows for symbols that
    /// consist of more than one character.
    Whitespace,
}

/// Determines what happens with transitions labeled by the epsilon marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EpsilonHandling {
    /// Epsilon transitions are never taken.
    #[default]
    Literal,
    /// The active set is closed under epsilon transitions before the first symbol and after
    /// each consumed symbol.
    Closure,
}

/// Configuration of an [`Evaluator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EvaluationOptions {
    pub tokenization: Tokenization,
    pub epsilon: EpsilonHandling,
}

impl EvaluationOptions {
    pub fn with_tokenization(mut self, tokenization: Tokenization) -> Self {
        self.tokenization = tokenization;
        self
    }

    pub fn with_epsilon(mut self, epsilon: EpsilonHandling) -> Self {
        self.epsilon = epsilon;
        self
    }
}

/// Evaluates words against a borrowed [`AutomatonDefinition`]. An evaluator is cheap to
/// create and to copy, and it holds no state between evaluations.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    definition: &'a AutomatonDefinition,
    options: EvaluationOptions,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator with default [`EvaluationOptions`].
    pub fn new(definition: &'a AutomatonDefinition) -> Self {
        Self {
            definition,
            options: EvaluationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EvaluationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> EvaluationOptions {
        self.options
    }

    pub fn definition(&self) -> &'a AutomatonDefinition {
        self.definition
    }

    /// Classifies `word`, which is split into symbols according to the configured
    /// [`Tokenization`].
    pub fn evaluate(&self, word: &str) -> Classification {
        self.evaluate_symbols(self.tokenize(word))
    }

    /// Like [`Self::evaluate`], but also records how the classification came about.
    pub fn run(&self, word: &str) -> Run {
        self.run_symbols(self.tokenize(word))
    }

    /// Classifies the word consisting of the given symbols.
    pub fn evaluate_symbols<I, S>(&self, symbols: I) -> Classification
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.resolve(symbols) {
            Ok(word) => self.simulate(&word, |_| ()).0,
            Err(reason) => {
                trace!("word is invalid, {reason}");
                Classification::Invalid
            }
        }
    }

    /// Evaluates the word consisting of the given symbols and records the visited active sets.
    pub fn run_symbols<I, S>(&self, symbols: I) -> Run
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.resolve(symbols) {
            Ok(word) => {
                let mut active_sets = Vec::with_capacity(word.len() + 1);
                let (classification, reason) =
                    self.simulate(&word, |active| active_sets.push(active.clone()));
                Run {
                    classification,
                    reason,
                    active_sets,
                }
            }
            Err(reason) => Run {
                classification: Classification::Invalid,
                reason: Some(reason),
                active_sets: vec![],
            },
        }
    }

    fn tokenize<'w>(&self, word: &'w str) -> impl Iterator<Item = &'w str> {
        match self.options.tokenization {
            Tokenization::Chars => Either::Left(
                word.char_indices()
                    .map(move |(i, c)| &word[i..i + c.len_utf8()]),
            ),
            Tokenization::Whitespace => Either::Right(word.split_whitespace()),
        }
    }

    /// Maps every symbol to its id, failing on the first one that is not in the alphabet.
    fn resolve<I, S>(&self, symbols: I) -> Result<Vec<SymbolId>, Reason>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let alphabet = self.definition.alphabet();
        symbols
            .into_iter()
            .enumerate()
            .map(|(position, symbol)| {
                let symbol = symbol.as_ref();
                alphabet.id_of(symbol).ok_or_else(|| Reason::UnknownSymbol {
                    position,
                    symbol: symbol.to_string(),
                })
            })
            .collect()
    }

    /// Runs the subset simulation on an already resolved word. `observe` is called with the
    /// initial active set and with every active set that is reached afterwards.
    fn simulate<F>(&self, word: &[SymbolId], mut observe: F) -> (Classification, Option<Reason>)
    where
        F: FnMut(&ActiveStateSet),
    {
        let definition = self.definition;
        let mut active = ActiveStateSet::singleton(definition.initial_id(), definition.size());
        self.close(&mut active);
        observe(&active);

        for (position, &symbol) in word.iter().enumerate() {
            let next = self.step(&active, symbol);
            if next.is_empty() {
                let symbol = definition.alphabet().symbol(symbol);
                trace!(
                    "{position}: no transition on `{symbol}` from {}, rejecting",
                    active.show(definition)
                );
                return (
                    Classification::Rejected,
                    Some(Reason::NoTransition {
                        position,
                        symbol: symbol.to_string(),
                    }),
                );
            }
            trace!(
                "{position}: {} --{}--> {}",
                active.show(definition),
                definition.alphabet().symbol(symbol),
                next.show(definition)
            );
            active = next;
            observe(&active);
        }

        if active.intersects(definition.final_set()) {
            trace!("accepting in {}", active.show(definition));
            (Classification::Accepted, None)
        } else {
            trace!("no final state in {}, rejecting", active.show(definition));
            (Classification::Rejected, Some(Reason::NoFinalStateReached))
        }
    }

    /// Collects every destination of a transition on `symbol` from any state in `active`.
    /// The epsilon marker never matches an input symbol, so reading it leads nowhere.
    fn step(&self, active: &ActiveStateSet, symbol: SymbolId) -> ActiveStateSet {
        let relation = self.definition.transition_relation();
        let mut next = ActiveStateSet::with_capacity(self.definition.size());
        if self.definition.alphabet().is_epsilon(symbol) {
            return next;
        }
        for state in active.iter() {
            for &target in relation.destinations(state, symbol) {
                next.insert(target);
            }
        }
        self.close(&mut next);
        next
    }

    /// Extends `active` by everything reachable through epsilon transitions, if the options
    /// ask for it.
    fn close(&self, active: &mut ActiveStateSet) {
        if self.options.epsilon != EpsilonHandling::Closure {
            return;
        }
        let relation = self.definition.transition_relation();
        let epsilon = self.definition.alphabet().epsilon_id();
        let mut queue: Vec<StateId> = active.iter().collect();
        while let Some(state) = queue.pop() {
            for &target in relation.destinations(state, epsilon) {
                if active.insert(target) {
                    queue.push(target);
                }
            }
        }
    }
}

impl AutomatonDefinition {
    /// Returns an [`Evaluator`] with default options for `self`.
    pub fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(self)
    }

    /// Classifies `word` with default [`EvaluationOptions`], i.e. every character is one symbol
    /// and epsilon transitions are not taken.
    pub fn evaluate(&self, word: &str) -> Classification {
        self.evaluator().evaluate(word)
    }

    /// Like [`Self::evaluate`], but returns the detailed [`Run`].
    pub fn run(&self, word: &str) -> Run {
        self.evaluator().run(word)
    }
}
