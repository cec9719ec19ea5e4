use tracing::{debug, trace};

use crate::{
    ast::{Expression, Statement},
    error::{InterpretResult, ParseError},
    interpreter::{
        cancellation::CancellationToken,
        lexer::TokenKind,
        registry::core::{ParserDescriptor, Registry},
        stream::LinkedToken,
        value::core::Data,
        variables::VariableService,
    },
};

/// Maximum depth of nested dispatches on one line.
pub const MAX_NESTING_DEPTH: usize = 128;

/// A successful parse: the recognized node, its evaluated value and the
/// position right after the consumed tokens.
#[derive(Debug, Clone)]
pub struct Parsed<'a, N, D> {
    /// The syntax node.
    pub node:   N,
    /// The value the node evaluated to.
    pub data:   D,
    /// The cursor to continue with.
    pub next:   LinkedToken<'a>,
    /// Name of the parser that produced the match, set by the dispatcher.
    pub parser: &'static str,
}

impl<'a, N, D> Parsed<'a, N, D> {
    /// Creates a match; the dispatcher fills in the parser name.
    pub fn new(node: N, data: D, next: LinkedToken<'a>) -> Self {
        Self { node,
               data,
               next,
               parser: "" }
    }
}

/// An expression match. Expressions always produce a value.
pub type ExpressionMatch<'a> = Parsed<'a, Expression, Data>;
/// A statement match. Statements may produce no value.
pub type StatementMatch<'a> = Parsed<'a, Statement, Option<Data>>;

/// Outcome of one parse attempt.
///
/// `Ok(None)` means the parser does not apply at this position and the next
/// candidate should be tried; `Err` aborts the line.
pub type Attempt<T> = InterpretResult<Option<T>>;

/// Signature shared by every pluggable parser.
pub type ParseFn<N, D> =
    for<'a, 'i, 'r> fn(&'i mut Interpretation<'r>, LinkedToken<'a>) -> Attempt<Parsed<'a, N, D>>;
/// Signature of statement parsers.
pub type StatementParseFn = ParseFn<Statement, Option<Data>>;
/// Signature of expression parsers.
pub type ExpressionParseFn = ParseFn<Expression, Data>;

/// The state of one document interpretation pass.
///
/// Owns the variable service of the pass and drives the registry's
/// "first match wins" dispatch for the pass's culture. Parsers receive it
/// mutably and call back into it to parse nested statements and
/// expressions.
pub struct Interpretation<'r> {
    registry:         &'r Registry,
    culture:          String,
    statement_order:  &'r [usize],
    expression_order: &'r [usize],
    variables:        VariableService,
    cancellation:     CancellationToken,
    depth:            usize,
}

impl<'r> Interpretation<'r> {
    /// Starts a pass for `culture` with an empty variable service.
    #[must_use]
    pub fn new(registry: &'r Registry, culture: &str, cancellation: CancellationToken) -> Self {
        Self { registry,
               culture: culture.to_string(),
               statement_order: registry.statements().resolve(culture),
               expression_order: registry.expressions().resolve(culture),
               variables: VariableService::new(),
               cancellation,
               depth: 0 }
    }

    /// The culture tag this pass was started with.
    #[must_use]
    pub fn culture(&self) -> &str {
        &self.culture
    }

    /// The variables declared so far.
    #[must_use]
    pub const fn variables(&self) -> &VariableService {
        &self.variables
    }

    /// Mutable access to the variables of the pass.
    pub const fn variables_mut(&mut self) -> &mut VariableService {
        &mut self.variables
    }

    /// Consumes the pass and returns its variables.
    #[must_use]
    pub fn into_variables(self) -> VariableService {
        self.variables
    }

    /// Returns `Err(Cancelled)` if the pass should stop.
    pub fn check_cancelled(&self) -> InterpretResult<()> {
        self.cancellation.check()
    }

    /// Parses and interprets one statement at `cursor`.
    pub fn parse_statement<'a>(&mut self,
                               cursor: LinkedToken<'a>)
                               -> Attempt<StatementMatch<'a>> {
        let registry = self.registry;
        let order = self.statement_order;
        self.dispatch("statement", registry.statements().parsers(), order, cursor)
    }

    /// Parses one statement in a view that ends before the next `stop`
    /// token. The returned cursor is back in the view of `cursor`.
    pub fn parse_statement_until<'a>(&mut self,
                                     cursor: LinkedToken<'a>,
                                     stop: TokenKind)
                                     -> Attempt<StatementMatch<'a>> {
        let found = self.parse_statement(cursor.until(stop))?;
        Ok(found.map(|found| Parsed { next: cursor.resume(found.next),
                                      ..found }))
    }

    /// Parses and evaluates one expression at `cursor`.
    pub fn parse_expression<'a>(&mut self,
                                cursor: LinkedToken<'a>)
                                -> Attempt<ExpressionMatch<'a>> {
        let registry = self.registry;
        let order = self.expression_order;
        self.dispatch("expression", registry.expressions().parsers(), order, cursor)
    }

    /// Parses one expression in a view that ends before the next `stop`
    /// token. The returned cursor is back in the view of `cursor`.
    pub fn parse_expression_until<'a>(&mut self,
                                      cursor: LinkedToken<'a>,
                                      stop: TokenKind)
                                      -> Attempt<ExpressionMatch<'a>> {
        let found = self.parse_expression(cursor.until(stop))?;
        Ok(found.map(|found| Parsed { next: cursor.resume(found.next),
                                      ..found }))
    }

    /// Parses an expression using only the expression parsers ordered after
    /// `parser`.
    ///
    /// Composite expression parsers use this to obtain their operands
    /// without dispatching back into themselves.
    pub fn parse_expression_after<'a>(&mut self,
                                      parser: &str,
                                      cursor: LinkedToken<'a>)
                                      -> Attempt<ExpressionMatch<'a>> {
        let registry = self.registry;
        let parsers = registry.expressions().parsers();
        let order = self.expression_order;
        let following = order.iter()
                             .position(|&index| parsers[index].name == parser)
                             .map_or(order, |position| &order[position + 1..]);
        self.dispatch("operand", parsers, following, cursor)
    }

    /// Tries `parsers` in `order`; the first match wins.
    fn dispatch<'a, N, D>(&mut self,
                          what: &'static str,
                          parsers: &'r [ParserDescriptor<ParseFn<N, D>>],
                          order: &'r [usize],
                          cursor: LinkedToken<'a>)
                          -> Attempt<Parsed<'a, N, D>> {
        self.check_cancelled()?;
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep { line: cursor.line() }.into());
        }

        self.depth += 1;
        let result = self.try_in_order(what, parsers, order, cursor);
        self.depth -= 1;
        result
    }

    fn try_in_order<'a, N, D>(&mut self,
                              what: &'static str,
                              parsers: &'r [ParserDescriptor<ParseFn<N, D>>],
                              order: &'r [usize],
                              cursor: LinkedToken<'a>)
                              -> Attempt<Parsed<'a, N, D>> {
        for &index in order {
            let descriptor = &parsers[index];
            trace!(what, parser = descriptor.name, line = cursor.line(), "trying");

            if let Some(mut found) = (descriptor.parse)(self, cursor)? {
                debug!(what, parser = descriptor.name, line = cursor.line(), "matched");
                found.parser = descriptor.name;
                return Ok(Some(found));
            }
        }

        Ok(None)
    }
}
