use crate::interpreter::{
    parser::{
        binary::{BINARY_OPERATION, parse_binary_operation},
        condition::parse_condition_statement,
        core::{ExpressionParseFn, StatementParseFn},
        function::parse_function_call,
        primary::{parse_data, parse_decimal_comma, parse_group, parse_variable_reference},
        statement::{
            parse_comment, parse_conditional_expression, parse_header, parse_numerical_expression,
            parse_variable_declaration,
        },
    },
    registry::core::ParserDescriptor,
};

/// Cultures that write decimals with a comma.
pub const DECIMAL_COMMA_CULTURES: &[&str] = &["fr", "de", "es", "it", "pt", "nl"];

/// The built-in statement parsers.
///
/// Resolved order: `Comment`, `Header`, `ConditionStatement`,
/// `VariableDeclaration`, `ConditionalExpression`, `NumericalExpression`.
#[must_use]
pub fn statement_parsers() -> Vec<ParserDescriptor<StatementParseFn>> {
    vec![ParserDescriptor::new("ConditionStatement", parse_condition_statement as StatementParseFn).after(&["Header"]),
         ParserDescriptor::new("VariableDeclaration", parse_variable_declaration as StatementParseFn)
             .after(&["ConditionStatement"]),
         ParserDescriptor::new("ConditionalExpression", parse_conditional_expression as StatementParseFn)
             .after(&["VariableDeclaration", "ConditionStatement"]),
         ParserDescriptor::new("NumericalExpression", parse_numerical_expression as StatementParseFn)
             .after(&["ConditionalExpression"]),
         ParserDescriptor::new("Comment", parse_comment as StatementParseFn).before(&["ConditionStatement"]),
         ParserDescriptor::new("Header", parse_header as StatementParseFn).after(&["Comment"]),]
}

/// The built-in expression parsers.
///
/// Resolved order: `BinaryOperation`, `Group`, `Function`, `Data`,
/// `VariableReference`, with `DecimalComma` ahead of `Data` in the
/// [`DECIMAL_COMMA_CULTURES`].
#[must_use]
pub fn expression_parsers() -> Vec<ParserDescriptor<ExpressionParseFn>> {
    vec![ParserDescriptor::new("Data", parse_data as ExpressionParseFn).before(&["VariableReference"]),
         ParserDescriptor::new("VariableReference", parse_variable_reference as ExpressionParseFn),
         ParserDescriptor::new("Group", parse_group as ExpressionParseFn).before(&["Function"]),
         ParserDescriptor::new("Function", parse_function_call as ExpressionParseFn)
             .before(&["Data", "VariableReference"]),
         ParserDescriptor::new(BINARY_OPERATION, parse_binary_operation as ExpressionParseFn)
             .before(&["Group", "Function", "Data", "VariableReference"]),
         ParserDescriptor::new("DecimalComma", parse_decimal_comma as ExpressionParseFn)
             .cultures(DECIMAL_COMMA_CULTURES)
             .before(&["Data"])
             .after(&["Function"]),]
}
