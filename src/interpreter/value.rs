/// Runtime data types.
///
/// Defines the closed `Data` enum produced by every evaluation, with the
/// conversions and promotions the operators rely on.
pub mod core;
