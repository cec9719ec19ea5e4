use std::fs;

use linecalc::{
    ast::{Expression, Statement},
    error::{InterpretError, ParseError, RegistryError, RuntimeError},
    interpret_document,
    interpreter::{
        cancellation::CancellationToken,
        document::{DocumentResult, DocumentSession, Engine, LineResult},
        lexer::{TokenCategory, TokenKind, tokenize},
        parser::core::{
            Attempt, ExpressionMatch, ExpressionParseFn, Interpretation, Parsed, StatementMatch,
            StatementParseFn,
        },
        registry::core::{ParserDescriptor, Registry, RegistryBuilder},
        stream::{LinkedToken, TokenStream},
        value::core::Data,
    },
};
use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for example in extract_examples(&content) {
            count += 1;
            let result = interpret_document(&example.document, &example.culture)
                .unwrap_or_else(|e| panic!("Example in {path:?} failed:\n{}\nError: {e}", example.document));
            assert_eq!(result.to_string(),
                       example.expected,
                       "unexpected output for example in {path:?}:\n{}",
                       example.document);
        }
    }

    assert!(count > 0, "No examples found in book/src");
}

struct BookExample {
    culture:  String,
    document: String,
    expected: String,
}

/// Collects every ```` ```linecalc [culture] ```` block followed by a
/// ```` ```output ```` block.
fn extract_examples(content: &str) -> Vec<BookExample> {
    let mut examples = Vec::new();
    let mut pending: Option<(String, String)> = None;
    let mut inside: Option<&str> = None;
    let mut culture = String::new();
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if inside.is_none() {
            if let Some(tag) = trimmed.strip_prefix("```linecalc") {
                inside = Some("linecalc");
                culture = tag.trim().to_string();
                if culture.is_empty() {
                    culture = "en-US".to_string();
                }
                buf.clear();
            } else if trimmed.starts_with("```output") {
                inside = Some("output");
                buf.clear();
            }
            continue;
        }
        if trimmed.starts_with("```") {
            let body = buf.strip_suffix('\n').unwrap_or(&buf).to_string();
            match inside.take() {
                Some("linecalc") => pending = Some((culture.clone(), body)),
                _ => {
                    if let Some((culture, document)) = pending.take() {
                        examples.push(BookExample { culture,
                                                    document,
                                                    expected: body });
                    }
                },
            }
            continue;
        }
        buf.push_str(line);
        buf.push('\n');
    }

    examples
}

fn interpret(src: &str) -> DocumentResult {
    interpret_in(src, "en-US")
}

fn interpret_in(src: &str, culture: &str) -> DocumentResult {
    match interpret_document(src, culture) {
        Ok(result) => result,
        Err(e) => panic!("Document failed: {e}"),
    }
}

fn assert_value(src: &str, expected: Data) {
    let result = interpret(src);
    let last = result.lines.last().expect("a document has at least one line");
    assert_eq!(last.result, LineResult::Value(expected), "for document:\n{src}");
}

fn assert_empty(src: &str) {
    let result = interpret(src);
    let last = result.lines.last().expect("a document has at least one line");
    assert_eq!(last.result, LineResult::Empty, "for document:\n{src}");
}

fn assert_failure(src: &str, expected: impl Into<InterpretError>) {
    let result = interpret(src);
    let last = result.lines.last().expect("a document has at least one line");
    assert_eq!(last.result, LineResult::Failed(expected.into()), "for document:\n{src}");
}

fn winning_parser(src: &str) -> Option<&'static str> {
    interpret(src).lines.last().and_then(|outcome| outcome.parser)
}

#[test]
fn basic_arithmetic() {
    assert_value("1 + 2", Data::Integer(3));
    assert_value("7 * 9", Data::Integer(63));
    assert_value("8 - 5", Data::Integer(3));
    assert_value("10 / 2", Data::Integer(5));
    assert_value("7 / 2", Data::Real(3.5));
    assert_value("1.5 + 1", Data::Real(2.5));
    assert_value("42", Data::Integer(42));
}

#[test]
fn operator_precedence_and_associativity() {
    assert_value("2 + 3 * 4", Data::Integer(14));
    assert_value("2 * 3 + 4 * 5", Data::Integer(26));
    assert_value("10 - 4 - 3", Data::Integer(3));
    assert_value("100 / 10 / 5", Data::Integer(2));
    assert_value("2 + 2 == 4", Data::Boolean(true));
    assert_value("5 > 3 + 10", Data::Boolean(false));
    assert_value("2 * 3 == 1 + 5", Data::Boolean(true));
}

#[test]
fn incomplete_operator_chains_stop_at_the_dangling_operator() {
    assert_failure("1 + 2 *",
                   ParseError::UnexpectedTrailingTokens { token: "*".to_string(),
                                                          line:  1, });
    assert_failure("1 < 2 +",
                   ParseError::UnexpectedTrailingTokens { token: "+".to_string(),
                                                          line:  1, });
    assert_failure("x = 1 + 2 * )",
                   ParseError::UnexpectedTrailingTokens { token: "*".to_string(),
                                                          line:  1, });
    assert_failure("(1 + 2 *)", ParseError::ExpectedClosingParen { line: 1 });
}

#[test]
fn parentheses_group_expressions() {
    assert_value("(2 + 3) * 4", Data::Integer(20));
    assert_value("2 * (3 + (4 - 1))", Data::Integer(12));
    assert_value("((7))", Data::Integer(7));
}

#[test]
fn negative_literals() {
    assert_value("-3 + 5", Data::Integer(2));
    assert_value("5 - -3", Data::Integer(8));
    assert_value("-1.5 * 2", Data::Real(-3.0));
}

#[test]
fn relational_operators() {
    assert_value("1 < 2", Data::Boolean(true));
    assert_value("2 <= 2", Data::Boolean(true));
    assert_value("3 > 4", Data::Boolean(false));
    assert_value("3 >= 4", Data::Boolean(false));
    assert_value("2 == 2.0", Data::Boolean(true));
    assert_value("1 != 2", Data::Boolean(true));
    assert_value("true == false", Data::Boolean(false));
    assert_value("\"abc\" == \"abc\"", Data::Boolean(true));
}

#[test]
fn literals() {
    assert_value("true", Data::Boolean(true));
    assert_value("\"hello world\"", Data::Text("hello world".to_string()));
}

#[test]
fn type_errors() {
    assert_failure("true + 1",
                   RuntimeError::TypeMismatch { operator: "+".to_string(),
                                                left:     "boolean".to_string(),
                                                right:    "number".to_string(),
                                                line:     1, });
    assert!(matches!(interpret("\"a\" < \"b\"").lines[0].result,
                     LineResult::Failed(InterpretError::Runtime(RuntimeError::TypeMismatch { .. }))));
    assert!(matches!(interpret("1 == true").lines[0].result,
                     LineResult::Failed(InterpretError::Runtime(RuntimeError::TypeMismatch { .. }))));
}

#[test]
fn numeric_errors() {
    assert_failure("10 / 0", RuntimeError::DivisionByZero { line: 1 });
    assert_failure("1.5 / 0", RuntimeError::DivisionByZero { line: 1 });
    assert_failure("9223372036854775807 + 1", RuntimeError::Overflow { line: 1 });
    assert_failure("99999999999999999999", RuntimeError::Overflow { line: 1 });
}

#[test]
fn inexact_division_of_large_integers_is_real() {
    assert_value("9223372036854775807 / 2", Data::from(9_223_372_036_854_775_807_i64 as f64 / 2.0));
    assert_value("9007199254740993 / 2", Data::from(9_007_199_254_740_993_i64 as f64 / 2.0));
    assert_value("9223372036854775806 / 2", Data::from(4_611_686_018_427_387_903_i64));
}

#[test]
fn variables_flow_across_lines() {
    let result = interpret("price = 12\nquantity = 3\nprice * quantity");
    assert_eq!(result.values(),
               vec![Some(&Data::Integer(12)), Some(&Data::Integer(3)), Some(&Data::Integer(36))]);
    assert_eq!(result.variables.try_get("price"), Some(&Data::Integer(12)));
    assert_eq!(result.variables.len(), 2);
}

#[test]
fn redeclaration_overwrites() {
    assert_value("x = 1\nx = x + 1\nx * 10", Data::Integer(20));
}

#[test]
fn unbound_variable_is_unrecognized() {
    assert_failure("y + 1", ParseError::UnrecognizedStatement { line: 1 });
}

#[test]
fn errors_do_not_stop_later_lines() {
    let result = interpret("10 / 0\n5 + 5\nnonsense here\nx = 2\nx");
    assert_eq!(result.to_string(),
               "Error on line 1: Division by zero.\n10\nError on line 3: Unrecognized statement.\n2\n2");
    assert_eq!(result.errors().map(|(line, _)| line).collect::<Vec<_>>(), vec![1, 3]);
}

#[test]
fn failed_declaration_binds_nothing() {
    let result = interpret("x = 1 / 0\nx");
    assert_eq!(result.lines[1].result,
               LineResult::Failed(ParseError::UnrecognizedStatement { line: 2 }.into()));
}

#[test]
fn empty_lines_comments_and_headers() {
    let result = interpret("# Budget\n\n// monthly rent\nrent = 900 // euros\nrent");
    assert_eq!(result.to_string(), "\n\n\n900\n900");
    assert_eq!(result.lines[0].parser, Some("Header"));
    assert_eq!(result.lines[1].parser, None);
    assert_eq!(result.lines[2].parser, Some("Comment"));
    assert_empty("");
}

#[test]
fn trailing_tokens_are_rejected() {
    assert_failure("5 6",
                   ParseError::UnexpectedTrailingTokens { token: "6".to_string(),
                                                          line:  1, });
    assert_failure("5 +",
                   ParseError::UnexpectedTrailingTokens { token: "+".to_string(),
                                                          line:  1, });
    assert_failure("5 $",
                   ParseError::UnexpectedTrailingTokens { token: "$".to_string(),
                                                          line:  1, });
}

#[test]
fn missing_closing_paren() {
    assert_failure("(1 + 2", ParseError::ExpectedClosingParen { line: 1 });
    assert_failure("max(1, 2", ParseError::ExpectedClosingParen { line: 1 });
}

#[test]
fn if_then_else() {
    assert_value("if 3 > 2 then 10 else 20", Data::Integer(10));
    assert_value("if 1 > 2 then 10 else 20", Data::Integer(20));
    assert_value("if true then 1 + 1", Data::Integer(2));
    assert_empty("if 1 > 2 then 10");
    assert_value("so if 2 == 2 then 7", Data::Integer(7));
}

#[test]
fn only_the_taken_branch_runs() {
    let result = interpret("if 1 < 2 then a = 1 else b = 2\na\nb");
    assert_eq!(result.lines[0].result, LineResult::Value(Data::Integer(1)));
    assert_eq!(result.lines[1].result, LineResult::Value(Data::Integer(1)));
    assert_eq!(result.lines[2].result,
               LineResult::Failed(ParseError::UnrecognizedStatement { line: 3 }.into()));
}

#[test]
fn condition_must_be_boolean() {
    assert_failure("if 5 then 1", ParseError::UnrecognizedStatement { line: 1 });
}

#[test]
fn missing_branches() {
    assert_failure("if true then",
                   ParseError::MissingBranch { keyword: "then".to_string(),
                                               line:    1, });
    assert_failure("if false then 1 else",
                   ParseError::MissingBranch { keyword: "else".to_string(),
                                               line:    1, });
}

#[test]
fn builtin_functions() {
    assert_value("sqrt(16)", Data::Integer(4));
    assert_value("sqrt(2.25)", Data::Real(1.5));
    assert_value("abs(-3)", Data::Integer(3));
    assert_value("max(2, 7, 3) + min(4; 1)", Data::Integer(8));
    assert_value("round(2.4) + floor(1.9) + ceil(1.1)", Data::Integer(5));
    assert_value("x = 9\nsqrt(x) * 2", Data::Integer(6));
    assert_failure("sqrt(-1)",
                   RuntimeError::InvalidArgument { details: "sqrt is undefined for -1".to_string(),
                                                   line:    1, });
    assert_failure("abs(1, 2)",
                   RuntimeError::ArgumentCountMismatch { name:     "abs".to_string(),
                                                         expected: 1,
                                                         found:    2,
                                                         line:     1, });
}

#[test]
fn function_names_can_be_variables() {
    assert_value("max = 3\nmax + 1", Data::Integer(4));
}

#[test]
fn comparisons_take_the_fast_path() {
    assert_eq!(winning_parser("2 + 3"), Some("ConditionalExpression"));
    assert_eq!(winning_parser("2 < 3"), Some("ConditionalExpression"));
    assert_eq!(winning_parser("5"), Some("NumericalExpression"));
    assert_eq!(winning_parser("(2 + 3)"), Some("NumericalExpression"));
    assert_eq!(winning_parser("x = 2 + 3"), Some("VariableDeclaration"));
    assert_eq!(winning_parser("if true then 1"), Some("ConditionStatement"));
}

#[test]
fn builtin_dispatch_order() {
    let registry = Registry::builtin().unwrap();
    assert_eq!(registry.statements().order_names("en-US"),
               vec!["Comment",
                    "Header",
                    "ConditionStatement",
                    "VariableDeclaration",
                    "ConditionalExpression",
                    "NumericalExpression"]);
    assert_eq!(registry.expressions().order_names("en-US"),
               vec!["BinaryOperation", "Group", "Function", "Data", "VariableReference"]);
    assert_eq!(registry.expressions().order_names("fr-FR"),
               vec!["BinaryOperation", "Group", "Function", "DecimalComma", "Data", "VariableReference"]);
}

#[test]
fn culture_resolution() {
    let registry = Registry::builtin().unwrap();
    let expressions = registry.expressions();
    assert_eq!(expressions.resolve("fr"), expressions.resolve("fr-CA"));
    assert_eq!(expressions.resolve("DE_de"), expressions.resolve("de"));
    assert_eq!(expressions.resolve("ja-JP"), expressions.resolve("any"));
    assert_eq!(expressions.resolve("ja-JP"), expressions.resolve("en-US"));
}

#[test]
fn decimal_comma_depends_on_culture() {
    let french = interpret_in("prix = 12,5\nprix * 2\nmax(1; 2,5)", "fr-FR");
    assert_eq!(french.values(),
               vec![Some(&Data::Real(12.5)), Some(&Data::Real(25.0)), Some(&Data::Real(2.5))]);

    let english = interpret_in("12,5", "en-US");
    assert_eq!(english.lines[0].result,
               LineResult::Failed(ParseError::UnexpectedTrailingTokens { token: ",".to_string(),
                                                                         line:  1, }.into()));

    let spaced = interpret_in("max(1, 5)", "de");
    assert_eq!(spaced.values(), vec![Some(&Data::Integer(5))]);
}

fn parse_answer<'a>(_: &mut Interpretation<'_>, cursor: LinkedToken<'a>) -> Attempt<ExpressionMatch<'a>> {
    if !cursor.is(TokenKind::Word) || cursor.text() != "answer" {
        return Ok(None);
    }
    let next = cursor.advance();
    Ok(Some(Parsed::new(Expression::Data { literal: Data::Integer(42),
                                           span:    cursor.span_to(next), },
                        Data::Integer(42),
                        next)))
}

#[test]
fn custom_parsers_are_ordered_by_constraints() {
    let registry = RegistryBuilder::with_builtin_parsers()
        .expression(ParserDescriptor::new("Answer", parse_answer as ExpressionParseFn).after(&["Data"])
                                                                     .before(&["VariableReference"]))
        .build()
        .unwrap();
    assert_eq!(registry.expressions().order_names("en-US"),
               vec!["BinaryOperation", "Group", "Function", "Data", "Answer", "VariableReference"]);

    let engine = Engine::new(registry);
    let result = engine.interpret("answer * 2\nanswer = 1\nanswer", "en-US", &CancellationToken::new())
                       .unwrap();
    assert_eq!(result.to_string(), "84\n1\n42");
}

#[test]
fn registry_without_statement_parsers_recognizes_nothing() {
    let engine = Engine::new(RegistryBuilder::new().build().unwrap());
    let result = engine.interpret("1 + 1\n", "en-US", &CancellationToken::new()).unwrap();
    assert_eq!(result.lines[0].result,
               LineResult::Failed(ParseError::UnrecognizedStatement { line: 1 }.into()));
    assert_eq!(result.lines[1].result, LineResult::Empty);
}

#[test]
fn registry_rejects_cycles() {
    let error = RegistryBuilder::new().expression(ParserDescriptor::new("A", parse_answer as ExpressionParseFn).before(&["B"]))
                                      .expression(ParserDescriptor::new("B", parse_answer as ExpressionParseFn).before(&["A"]))
                                      .build()
                                      .unwrap_err();
    assert_eq!(error,
               RegistryError::OrderingCycle { culture: "any".to_string(),
                                              parsers: vec!["A".to_string(), "B".to_string()], });
}

#[test]
fn cycles_are_detected_per_culture() {
    let error = RegistryBuilder::new()
        .expression(ParserDescriptor::new("A", parse_answer as ExpressionParseFn).cultures(&["fr"])
                                                                 .before(&["B"]))
        .expression(ParserDescriptor::new("B", parse_answer as ExpressionParseFn).before(&["A"]))
        .build()
        .unwrap_err();
    assert_eq!(error,
               RegistryError::OrderingCycle { culture: "fr".to_string(),
                                              parsers: vec!["A".to_string(), "B".to_string()], });
}

#[test]
fn registry_rejects_duplicates_and_unknown_references() {
    let duplicate = RegistryBuilder::with_builtin_parsers()
        .expression(ParserDescriptor::new("Data", parse_answer as ExpressionParseFn))
        .build()
        .unwrap_err();
    assert_eq!(duplicate, RegistryError::DuplicateParser { name: "Data".to_string() });

    let unknown = RegistryBuilder::new()
        .expression(ParserDescriptor::new("Answer", parse_answer as ExpressionParseFn).after(&["Nope"]))
        .build()
        .unwrap_err();
    assert_eq!(unknown,
               RegistryError::UnknownParser { parser:    "Answer".to_string(),
                                              reference: "Nope".to_string(), });
}

#[test]
fn deep_nesting_is_an_error() {
    let src = format!("{}1{}", "(".repeat(200), ")".repeat(200));
    assert_failure(&src, ParseError::NestingTooDeep { line: 1 });
}

#[test]
fn cancelled_pass_publishes_nothing() {
    let engine = Engine::builtin().unwrap();
    let token = CancellationToken::new();
    token.cancel();
    token.cancel();
    assert!(token.is_cancelled());
    assert!(engine.interpret("1 + 1", "en-US", &token).is_err());

    let fresh = CancellationToken::new();
    assert_eq!(engine.interpret("1 + 1", "en-US", &fresh).unwrap().to_string(), "2");
}

#[test]
fn session_keeps_the_latest_text() {
    let mut session = DocumentSession::new(Engine::builtin().unwrap(), "en-US");
    assert!(session.latest().is_none());

    session.text_changed("a = 1");
    session.text_changed("a = 2\na * 10");
    session.wait();
    assert_eq!(session.latest().unwrap().to_string(), "2\n20");

    session.text_changed("3 * 3");
    session.wait();
    assert_eq!(session.latest().unwrap().to_string(), "9");
}

#[test]
fn single_line_evaluation() {
    let engine = Engine::builtin().unwrap();
    assert_eq!(engine.evaluate_line("2 * 21", "en-US"), Ok(Some(Data::Integer(42))));
    assert_eq!(engine.evaluate_line("// nothing", "en-US"), Ok(None));
    assert_eq!(engine.evaluate_line("", "en-US"), Ok(None));
}

#[test]
fn variable_service_lists_bindings_by_name() {
    let result = interpret("width = 4\narea = width * 2\nwidth = 5");
    let bindings: Vec<(&str, &Data)> = result.variables
                                             .iter()
                                             .map(|variable| (variable.name.as_str(), &variable.value))
                                             .collect();
    assert_eq!(bindings, vec![("area", &Data::Integer(8)), ("width", &Data::Integer(5))]);

    let mut variables = result.variables.clone();
    variables.clear();
    assert!(variables.is_empty());
}

#[test]
fn tokens_are_classified_and_positioned() {
    let tokens = tokenize("if x >= 1.5 then \"ok\" // done\r\ny ? 2");
    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(kinds,
               vec![TokenKind::If,
                    TokenKind::Word,
                    TokenKind::GreaterEqual,
                    TokenKind::Number,
                    TokenKind::Then,
                    TokenKind::Text,
                    TokenKind::Comment,
                    TokenKind::NewLine,
                    TokenKind::Word,
                    TokenKind::Unknown,
                    TokenKind::Number]);
    assert_eq!(tokens[0].kind.category(), TokenCategory::Keyword);
    assert_eq!(tokens[2].kind.category(), TokenCategory::Operator);
    assert_eq!(tokens[9].kind.category(), TokenCategory::Unknown);
    assert_eq!((tokens[3].offset, tokens[3].length, tokens[3].leading_whitespace), (8, 3, 1));
    assert_eq!(tokens[8].line, 2);
}

#[test]
fn linked_token_navigation() {
    let stream = TokenStream::new("total = if a then b else c\n\nlast");
    assert_eq!(stream.line_count(), 3);
    assert!(stream.line(1).is_some_and(|cursor| cursor.is_end()));
    assert!(stream.line(3).is_none());

    let first = stream.line(0).unwrap();
    assert_eq!(first.text(), "total");
    assert!(first.previous().is_none());
    assert!(first.skip_token(TokenKind::Equals, false).is_none());

    let after_equals = first.next().and_then(|equals| equals.skip_token(TokenKind::Equals, false)).unwrap();
    assert!(after_equals.is(TokenKind::If));
    assert_eq!(after_equals.previous().map(|equals| equals.text()), Some("="));

    let then = after_equals.jump_to_next_token_of_type(TokenKind::Then).unwrap();
    assert_eq!(first.skip_token(TokenKind::Equals, true).map(|cursor| cursor.index()),
               Some(after_equals.index()));
    assert_eq!(first.skip_to_last_token().map(|last| last.text()), Some("c"));

    let narrowed = after_equals.until(TokenKind::Else);
    assert_eq!(narrowed.skip_to_last_token().map(|last| last.text()), Some("b"));
    assert_eq!(narrowed.text_to_end(), "if a then b");
    assert!(narrowed.jump_to_next_token_of_type(TokenKind::Else).is_none());

    let end = narrowed.end_of_view();
    assert!(end.is_end());
    assert_eq!(end.advance(), end);
    let resumed = first.resume(end);
    assert!(resumed.is(TokenKind::Else));
    assert_eq!(then.span_to(resumed).first, then.index());
}

static INTERRUPTED: Lazy<CancellationToken> = Lazy::new(CancellationToken::new);

/// Recognizes the word `interrupt` and cancels [`INTERRUPTED`].
fn parse_interrupt<'a>(_: &mut Interpretation<'_>, cursor: LinkedToken<'a>) -> Attempt<StatementMatch<'a>> {
    if !cursor.is(TokenKind::Word) || cursor.text() != "interrupt" {
        return Ok(None);
    }
    INTERRUPTED.cancel();
    let next = cursor.advance();
    Ok(Some(Parsed::new(Statement::Comment { span: cursor.span_to(next) }, None, next)))
}

#[test]
fn cancellation_mid_pass_then_rerun() {
    let registry =
        RegistryBuilder::with_builtin_parsers().statement(ParserDescriptor::new("Interrupt",
                                                                                parse_interrupt as StatementParseFn)
                                                              .before(&["VariableDeclaration"]))
                                               .build()
                                               .unwrap();
    let engine = Engine::new(registry);
    let document = "a = 2\ninterrupt\na * 3";

    assert!(engine.interpret(document, "en-US", &INTERRUPTED).is_err());
    assert!(INTERRUPTED.is_cancelled());

    let rerun = engine.interpret(document, "en-US", &CancellationToken::new()).unwrap();
    assert_eq!(rerun.to_string(), "2\n\n6");
    assert_eq!(rerun.lines[1].parser, Some("Interrupt"));
}
