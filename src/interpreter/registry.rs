/// Built-in parser tables.
///
/// Declares the statement and expression parsers every registry starts
/// from, with their cultures and ordering constraints.
pub mod builtin;
/// Registry types and construction.
///
/// Defines parser descriptors, the per-culture parser sets and the builder
/// that validates and resolves them.
pub mod core;
/// Dispatch order resolution.
///
/// Implements the stable topological sort over before/after constraints.
pub mod ordering;
