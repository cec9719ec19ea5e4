use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use once_cell::sync::OnceCell;
use tracing::{debug, info};

use crate::{
    error::RegistryError,
    interpreter::{
        parser::core::{ExpressionParseFn, StatementParseFn},
        registry::{builtin, ordering::stable_topological_sort},
    },
};

/// Culture tag of parsers that apply to every culture.
pub const ANY_CULTURE: &str = "any";

/// A pluggable parser and its registration metadata.
///
/// `before` and `after` name other parsers of the same registry that this
/// one must be tried before or after. `cultures` lists the locale tags the
/// parser applies to; [`ANY_CULTURE`] makes it apply everywhere.
#[derive(Debug, Clone)]
pub struct ParserDescriptor<F> {
    /// Unique name within its registry.
    pub name:     &'static str,
    /// Locale tags, or [`ANY_CULTURE`].
    pub cultures: &'static [&'static str],
    /// Parsers this one must precede.
    pub before:   &'static [&'static str],
    /// Parsers this one must follow.
    pub after:    &'static [&'static str],
    /// The parse-and-interpret function.
    pub parse:    F,
}

impl<F> ParserDescriptor<F> {
    /// Creates a descriptor for every culture, without ordering constraints.
    pub fn new(name: &'static str, parse: F) -> Self {
        Self { name,
               cultures: &[ANY_CULTURE],
               before: &[],
               after: &[],
               parse }
    }

    /// Restricts the parser to the given locale tags.
    #[must_use]
    pub fn cultures(mut self, cultures: &'static [&'static str]) -> Self {
        self.cultures = cultures;
        self
    }

    /// Requires this parser to be tried before the named ones.
    #[must_use]
    pub fn before(mut self, names: &'static [&'static str]) -> Self {
        self.before = names;
        self
    }

    /// Requires this parser to be tried after the named ones.
    #[must_use]
    pub fn after(mut self, names: &'static [&'static str]) -> Self {
        self.after = names;
        self
    }

    /// Returns `true` if the parser participates in every culture.
    #[must_use]
    pub fn is_any_culture(&self) -> bool {
        self.cultures.is_empty()
        || self.cultures.iter().any(|culture| culture.eq_ignore_ascii_case(ANY_CULTURE))
    }

    /// Returns `true` if the parser participates in the partition `culture`.
    #[must_use]
    pub fn applies_to(&self, culture: &str) -> bool {
        self.is_any_culture()
        || self.cultures.iter().any(|tag| tag.eq_ignore_ascii_case(culture))
    }
}

/// One kind of parsers (statements or expressions) with its resolved
/// dispatch order per culture.
#[derive(Debug, Clone)]
pub struct ParserSet<F> {
    parsers:  Vec<ParserDescriptor<F>>,
    orders:   HashMap<String, Vec<usize>>,
    fallback: Vec<usize>,
}

impl<F> ParserSet<F> {
    /// Validates the descriptors and resolves one order per culture.
    fn build(parsers: Vec<ParserDescriptor<F>>) -> Result<Self, RegistryError> {
        validate(&parsers)?;

        let mut cultures: Vec<String> =
            parsers.iter()
                   .filter(|parser| !parser.is_any_culture())
                   .flat_map(|parser| parser.cultures.iter().map(|tag| tag.to_ascii_lowercase()))
                   .collect::<HashSet<_>>()
                   .into_iter()
                   .collect();
        cultures.sort();

        let mut orders = HashMap::with_capacity(cultures.len());
        for culture in cultures {
            let members: Vec<usize> = (0..parsers.len()).filter(|&index| parsers[index].applies_to(&culture))
                                                         .collect();
            let order = stable_topological_sort(&culture, &parsers, &members)?;
            debug!(culture = %culture, parsers = order.len(), "resolved culture partition");
            orders.insert(culture, order);
        }

        let members: Vec<usize> = (0..parsers.len()).filter(|&index| parsers[index].is_any_culture())
                                                     .collect();
        let fallback = stable_topological_sort(ANY_CULTURE, &parsers, &members)?;

        Ok(Self { parsers,
                  orders,
                  fallback })
    }

    /// All registered descriptors, in registration order.
    #[must_use]
    pub fn parsers(&self) -> &[ParserDescriptor<F>] {
        &self.parsers
    }

    /// Resolves the dispatch order for a culture tag.
    ///
    /// The exact tag is tried first, then its language part (`fr-FR` falls
    /// back to `fr`), then the partition of culture-independent parsers.
    /// Tags are compared case-insensitively.
    #[must_use]
    pub fn resolve(&self, culture: &str) -> &[usize] {
        let culture = culture.to_ascii_lowercase();
        if let Some(order) = self.orders.get(&culture) {
            return order;
        }
        if let Some((language, _)) = culture.split_once(['-', '_'])
           && let Some(order) = self.orders.get(language)
        {
            return order;
        }
        &self.fallback
    }

    /// Names of the parsers in dispatch order for a culture tag.
    #[must_use]
    pub fn order_names(&self, culture: &str) -> Vec<&'static str> {
        self.resolve(culture)
            .iter()
            .map(|&index| self.parsers[index].name)
            .collect()
    }
}

/// Rejects duplicate names and ordering references to unknown parsers.
fn validate<F>(parsers: &[ParserDescriptor<F>]) -> Result<(), RegistryError> {
    let mut names = HashSet::with_capacity(parsers.len());
    for parser in parsers {
        if !names.insert(parser.name) {
            return Err(RegistryError::DuplicateParser { name: parser.name.to_string() });
        }
    }

    for parser in parsers {
        if let Some(reference) = parser.before
                                       .iter()
                                       .chain(parser.after)
                                       .find(|reference| !names.contains(*reference))
        {
            return Err(RegistryError::UnknownParser { parser:    parser.name.to_string(),
                                                      reference: (*reference).to_string(), });
        }
    }

    Ok(())
}

/// The statement and expression parsers of an engine, with their resolved
/// dispatch orders.
///
/// A registry is immutable once built and can be shared freely between
/// threads and interpretation passes.
#[derive(Debug, Clone)]
pub struct Registry {
    statements:  ParserSet<StatementParseFn>,
    expressions: ParserSet<ExpressionParseFn>,
}

static BUILTIN_REGISTRY: OnceCell<Arc<Registry>> = OnceCell::new();

impl Registry {
    /// The registry of built-in parsers, built once per process and shared.
    ///
    /// # Errors
    /// Returns the build error if the built-in tables are inconsistent.
    pub fn builtin() -> Result<Arc<Self>, RegistryError> {
        BUILTIN_REGISTRY.get_or_try_init(|| RegistryBuilder::with_builtin_parsers().build().map(Arc::new))
                        .map(Arc::clone)
    }

    /// The statement parsers.
    #[must_use]
    pub const fn statements(&self) -> &ParserSet<StatementParseFn> {
        &self.statements
    }

    /// The expression parsers.
    #[must_use]
    pub const fn expressions(&self) -> &ParserSet<ExpressionParseFn> {
        &self.expressions
    }
}

/// Collects parser descriptors and resolves them into a [`Registry`].
///
/// # Example
/// ```
/// use linecalc::interpreter::registry::core::RegistryBuilder;
///
/// let registry = RegistryBuilder::with_builtin_parsers().build().unwrap();
/// assert_eq!(registry.statements().order_names("en-US")[0], "Comment");
/// ```
#[derive(Debug, Default, Clone)]
pub struct RegistryBuilder {
    statements:  Vec<ParserDescriptor<StatementParseFn>>,
    expressions: Vec<ParserDescriptor<ExpressionParseFn>>,
}

impl RegistryBuilder {
    /// Creates a builder with no parsers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder holding the built-in parsers.
    #[must_use]
    pub fn with_builtin_parsers() -> Self {
        Self { statements:  builtin::statement_parsers(),
               expressions: builtin::expression_parsers(), }
    }

    /// Registers a statement parser.
    #[must_use]
    pub fn statement(mut self, descriptor: ParserDescriptor<StatementParseFn>) -> Self {
        self.statements.push(descriptor);
        self
    }

    /// Registers an expression parser.
    #[must_use]
    pub fn expression(mut self, descriptor: ParserDescriptor<ExpressionParseFn>) -> Self {
        self.expressions.push(descriptor);
        self
    }

    /// Validates the descriptors and resolves every culture's dispatch
    /// order.
    ///
    /// # Errors
    /// - `DuplicateParser` when two parsers of one kind share a name.
    /// - `UnknownParser` when a before/after constraint names a parser that
    ///   is not registered.
    /// - `OrderingCycle` when the constraints of a culture are cyclic.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let statements = ParserSet::build(self.statements)?;
        let expressions = ParserSet::build(self.expressions)?;
        info!(statements = statements.parsers.len(),
              expressions = expressions.parsers.len(),
              cultures = statements.orders.len().max(expressions.orders.len()),
              "parser registry built");

        Ok(Registry { statements,
                      expressions })
    }
}
