use std::fmt::{Result, Write};

use itertools::Itertools;

use crate::definition::AutomatonDefinition;

impl AutomatonDefinition {
    /// Writes `self` in the textual format that [`crate::input`] reads. Labels are written
    /// as they are, so the output can only be read back if no label contains whitespace, which
    /// is always the case for definitions that were loaded from text.
    pub fn write_definition<W: Write>(&self, w: &mut W) -> Result {
        writeln!(w, "{}", self.alphabet().symbols().join(" "))?;
        writeln!(w, "{}", self.states().join(" "))?;
        writeln!(w, "{}", self.initial())?;
        writeln!(w, "{}", self.final_states().join(" "))?;
        for (origin, symbol, destination) in self.transitions() {
            writeln!(w, "{origin} {symbol} {destination}")?;
        }
        Ok(())
    }
}

impl std::fmt::Display for AutomatonDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result {
        self.write_definition(f)
    }
}
