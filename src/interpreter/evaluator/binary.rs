/// Comparison operators (`== != < <= > >=`).
pub mod comparison;
/// Operator routing.
pub mod core;
/// Arithmetic on numbers (`+ - * /`).
pub mod scalar;
