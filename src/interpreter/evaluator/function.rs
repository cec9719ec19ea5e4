/// Built-in function implementations.
///
/// Contains the mathematical functions available by default in expressions.
pub mod builtin;

/// The built-in function table, arity checks and call dispatch.
pub mod core;
