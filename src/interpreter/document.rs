use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
    thread::{self, JoinHandle},
};

use tracing::{debug, info, trace, warn};

use crate::{
    error::{Cancelled, InterpretError, InterpretResult, ParseError, RegistryError},
    interpreter::{
        cancellation::CancellationToken,
        lexer::TokenKind,
        parser::core::Interpretation,
        registry::core::Registry,
        stream::{LinkedToken, TokenStream},
        value::core::Data,
        variables::VariableService,
    },
};

/// What one line of a document produced.
#[derive(Debug, Clone, PartialEq)]
pub enum LineResult {
    /// The line's statement yielded a value.
    Value(Data),
    /// The line was blank, or its statement yields nothing (comments,
    /// headers, a false condition without `else`).
    Empty,
    /// The line could not be parsed or evaluated.
    Failed(InterpretError),
}

impl fmt::Display for LineResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(data) => write!(f, "{data}"),
            Self::Empty => Ok(()),
            Self::Failed(error) => write!(f, "{error}"),
        }
    }
}

/// The outcome of one document line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineOutcome {
    /// The 1-based line number.
    pub line:   usize,
    /// What the line produced.
    pub result: LineResult,
    /// Name of the statement parser that recognized the line, if any.
    pub parser: Option<&'static str>,
}

/// The per-line results of a completed interpretation pass.
#[derive(Debug, Clone, Default)]
pub struct DocumentResult {
    /// One outcome per document line, in order.
    pub lines:     Vec<LineOutcome>,
    /// The variables declared by the pass.
    pub variables: VariableService,
}

impl DocumentResult {
    /// The values of the lines, `None` for lines without one.
    #[must_use]
    pub fn values(&self) -> Vec<Option<&Data>> {
        self.lines
            .iter()
            .map(|outcome| match &outcome.result {
                LineResult::Value(data) => Some(data),
                _ => None,
            })
            .collect()
    }

    /// The lines that failed, with their errors.
    pub fn errors(&self) -> impl Iterator<Item = (usize, &InterpretError)> {
        self.lines.iter().filter_map(|outcome| match &outcome.result {
                              LineResult::Failed(error) => Some((outcome.line, error)),
                              _ => None,
                          })
    }
}

/// Renders one output line per document line.
impl fmt::Display for DocumentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, outcome) in self.lines.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", outcome.result)?;
        }
        Ok(())
    }
}

/// Interprets documents with one parser registry.
///
/// Engines are cheap to clone and can be moved to worker threads; the
/// registry is shared.
///
/// # Example
/// ```
/// use linecalc::interpreter::{cancellation::CancellationToken, document::Engine, value::core::Data};
///
/// let engine = Engine::builtin().unwrap();
/// let result = engine.interpret("x = 4\nx * 2", "en-US", &CancellationToken::new()).unwrap();
/// assert_eq!(result.values(), vec![Some(&Data::Integer(4)), Some(&Data::Integer(8))]);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Arc<Registry>,
}

impl Engine {
    /// Creates an engine over a custom registry.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self { registry: Arc::new(registry) }
    }

    /// Creates an engine over the built-in parsers.
    ///
    /// # Errors
    /// Returns the registry build error if the built-in tables are
    /// inconsistent.
    pub fn builtin() -> Result<Self, RegistryError> {
        Ok(Self { registry: Registry::builtin()? })
    }

    /// The registry driving this engine.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Interprets every line of `text` in order.
    ///
    /// Each pass starts with no variables; declarations are visible to the
    /// lines below them. A failing line is recorded and the pass continues
    /// with the next one.
    ///
    /// # Errors
    /// Returns `Cancelled` as soon as `cancellation` is observed; partial
    /// results are discarded.
    pub fn interpret(&self,
                     text: &str,
                     culture: &str,
                     cancellation: &CancellationToken)
                     -> Result<DocumentResult, Cancelled> {
        let stream = TokenStream::new(text);
        let mut interpretation = Interpretation::new(&self.registry, culture, cancellation.clone());
        let mut lines = Vec::with_capacity(stream.line_count());

        for index in 0..stream.line_count() {
            if cancellation.is_cancelled() {
                debug!(line = index + 1, "interpretation cancelled");
                return Err(Cancelled);
            }
            let Some(cursor) = stream.line(index) else {
                break;
            };

            let (result, parser) = match interpret_line(&mut interpretation, cursor) {
                Ok((Some(data), parser)) => (LineResult::Value(data), parser),
                Ok((None, parser)) => (LineResult::Empty, parser),
                Err(InterpretError::Cancelled(cancelled)) => {
                    debug!(line = index + 1, "interpretation cancelled");
                    return Err(cancelled);
                },
                Err(error) => {
                    debug!(line = index + 1, %error, "line failed");
                    (LineResult::Failed(error), None)
                },
            };
            lines.push(LineOutcome { line: index + 1,
                                     result,
                                     parser });
        }

        info!(lines = lines.len(), culture, "document interpreted");
        Ok(DocumentResult { lines,
                            variables: interpretation.into_variables() })
    }

    /// Interprets a single line with no variables declared.
    ///
    /// # Errors
    /// Returns the line's parse or runtime error.
    pub fn evaluate_line(&self, line: &str, culture: &str) -> InterpretResult<Option<Data>> {
        let stream = TokenStream::new(line);
        let mut interpretation = Interpretation::new(&self.registry, culture, CancellationToken::new());
        match stream.line(0) {
            Some(cursor) => interpret_line(&mut interpretation, cursor).map(|(data, _)| data),
            None => Ok(None),
        }
    }
}

/// Runs the statement dispatch on one line and checks that it consumed
/// everything but a trailing comment.
fn interpret_line(interpretation: &mut Interpretation<'_>,
                  cursor: LinkedToken<'_>)
                  -> InterpretResult<(Option<Data>, Option<&'static str>)> {
    if cursor.is_end() {
        return Ok((None, None));
    }

    let Some(found) = interpretation.parse_statement(cursor)? else {
        return Err(ParseError::UnrecognizedStatement { line: cursor.line() }.into());
    };
    if !found.next.is_end() && !found.next.is(TokenKind::Comment) {
        return Err(ParseError::UnexpectedTrailingTokens { token: found.next.text().to_string(),
                                                          line:  cursor.line(), }.into());
    }

    trace!(parser = found.parser, tokens = ?found.node.span(), "statement interpreted");
    Ok((found.data, Some(found.parser)))
}

/// The most recent result published by a session, tagged with the
/// generation of the pass that produced it.
type Published = Arc<Mutex<Option<(u64, DocumentResult)>>>;

/// Keeps one document's interpretation up to date as its text changes.
///
/// Every [`text_changed`](Self::text_changed) cancels the pass in flight and
/// starts a new one on a worker thread. A cancelled pass publishes nothing;
/// an older pass never overwrites the result of a newer one.
///
/// # Example
/// ```
/// use linecalc::interpreter::document::{DocumentSession, Engine};
///
/// let mut session = DocumentSession::new(Engine::builtin().unwrap(), "en-US");
/// session.text_changed("1 + 1");
/// session.text_changed("2 + 2");
/// session.wait();
/// assert_eq!(session.latest().unwrap().to_string(), "4");
/// ```
#[derive(Debug)]
pub struct DocumentSession {
    engine:     Engine,
    culture:    String,
    generation: u64,
    current:    Option<(CancellationToken, JoinHandle<()>)>,
    published:  Published,
}

impl DocumentSession {
    /// Creates a session with no pass running.
    #[must_use]
    pub fn new(engine: Engine, culture: &str) -> Self {
        Self { engine,
               culture: culture.to_string(),
               generation: 0,
               current: None,
               published: Arc::default() }
    }

    /// Cancels the running pass, if any, and interprets `text` on a new
    /// worker thread.
    pub fn text_changed(&mut self, text: &str) {
        if let Some((token, _)) = &self.current {
            token.cancel();
        }

        self.generation += 1;
        let generation = self.generation;
        let token = CancellationToken::new();
        let engine = self.engine.clone();
        let culture = self.culture.clone();
        let text = text.to_string();
        let published = Arc::clone(&self.published);
        let worker_token = token.clone();

        let handle = thread::spawn(move || {
            let Ok(result) = engine.interpret(&text, &culture, &worker_token) else {
                return;
            };
            let mut slot = published.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.as_ref().is_none_or(|(published, _)| *published < generation) {
                *slot = Some((generation, result));
            }
        });

        self.current = Some((token, handle));
    }

    /// Cancels the running pass without starting a new one.
    pub fn cancel(&self) {
        if let Some((token, _)) = &self.current {
            token.cancel();
        }
    }

    /// Blocks until the latest pass has finished or stopped.
    pub fn wait(&mut self) {
        if let Some((_, handle)) = self.current.take()
           && handle.join().is_err()
        {
            warn!("interpretation worker panicked");
        }
    }

    /// The result of the newest pass that ran to completion.
    #[must_use]
    pub fn latest(&self) -> Option<DocumentResult> {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(_, result)| result.clone())
    }
}

impl Drop for DocumentSession {
    fn drop(&mut self) {
        self.cancel();
    }
}
