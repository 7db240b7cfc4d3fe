use tracing::debug;

use crate::{definition::AutomatonDefinition, math::OrderedMap};

use super::{Classification, Evaluator};

/// Maps each evaluated word to its classification, in the order in which the words were
/// first given.
pub type Classifications = OrderedMap<String, Classification>;

impl Evaluator<'_> {
    /// Evaluates every word independently. A word that is given more than once appears only
    /// once in the result.
    pub fn evaluate_batch<I, W>(&self, words: I) -> Classifications
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let classifications: Classifications = words
            .into_iter()
            .map(|word| {
                let word = word.as_ref();
                (word.to_string(), self.evaluate(word))
            })
            .collect();
        debug!("evaluated batch of {} distinct words", classifications.len());
        classifications
    }

    /// Parallel version of [`Self::evaluate_batch`]. The words are distributed over the rayon
    /// thread pool, the result is identical to the sequential one.
    #[cfg(feature = "parallel")]
    pub fn par_evaluate_batch<W>(&self, words: &[W]) -> Classifications
    where
        W: AsRef<str> + Sync,
    {
        use rayon::prelude::*;

        let evaluated: Vec<(String, Classification)> = words
            .par_iter()
            .map(|word| {
                let word = word.as_ref();
                (word.to_string(), self.evaluate(word))
            })
            .collect();
        debug!("evaluated batch of {} words in parallel", evaluated.len());
        evaluated.into_iter().collect()
    }
}

impl AutomatonDefinition {
    /// Evaluates all `words` with default options, see [`Evaluator::evaluate_batch`].
    pub fn evaluate_batch<I, W>(&self, words: I) -> Classifications
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        self.evaluator().evaluate_batch(words)
    }
}
