use std::collections::HashMap;

use tracing::trace;

use crate::interpreter::value::core::Data;

/// A named value.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// The name the value was declared under.
    pub name:  String,
    /// The current value.
    pub value: Data,
}

/// The symbol table of one document interpretation.
///
/// Bindings live for the rest of the pass: a variable declared on line 3 is
/// visible on line 10. Declaring an existing name overwrites it; there are no
/// nested scopes and no way to undeclare a name.
#[derive(Debug, Default, Clone)]
pub struct VariableService {
    variables: HashMap<String, Variable>,
}

impl VariableService {
    /// Creates an empty variable service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `value`, replacing any previous binding.
    pub fn declare(&mut self, name: &str, value: Data) {
        trace!(name, %value, "declare variable");
        self.variables.insert(name.to_string(),
                              Variable { name: name.to_string(),
                                         value });
    }

    /// Looks up the current value of `name`.
    #[must_use]
    pub fn try_get(&self, name: &str) -> Option<&Data> {
        self.variables.get(name).map(|variable| &variable.value)
    }

    /// The number of declared variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns `true` if nothing has been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterates over all declared variables, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        let mut variables: Vec<_> = self.variables.values().collect();
        variables.sort_by(|a, b| a.name.cmp(&b.name));
        variables.into_iter()
    }

    /// Removes every binding, as when interpretation restarts.
    pub fn clear(&mut self) {
        self.variables.clear();
    }
}
