use core::fmt;

/// The error returned when a value sequence does not provide exactly one value
/// per key.
///
/// This is the only failure [`EnumMap`](crate::EnumMap) can report at runtime.
/// The other ways to misuse the type are unrepresentable: a key is statically
/// a member of `K`, so indexed access cannot miss; a named accessor that
/// doesn't correspond to a member doesn't exist; and writes through a shared
/// borrow are rejected by the compiler.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LengthMismatch {
  /// The number of values the map requires, one per key.
  pub expected: usize,
  /// The number of values the sequence actually produced.
  pub actual: usize,
}

impl fmt::Display for LengthMismatch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let Self { expected, actual } = self;
    write!(f, "expected a sequence of exactly {expected} values, got {actual}")
  }
}

#[cfg(feature = "std")]
impl std::error::Error for LengthMismatch {}
