/// Largest square system (rows == unknowns) reduced by the iterative sweep
/// strategy. Anything bigger, or rectangular, uses a single elimination pass.
pub const SMALL_SQUARE_LIMIT: usize = 5;

/// Upper bound on the sweeps of the iterative strategy.
pub const MAX_SWEEPS: usize = 64;
