// skein/src/core/either.rs

//! A two-case sum type used by `Action::branch` to route execution.

/// Explicit two-case value. Branching decisions are encoded in data rather
/// than in control-flow exceptions: a selector action produces an `Either`,
/// and the branch combinator routes on the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Either<L, R> {
  Left(L),
  Right(R),
}

impl<L, R> Either<L, R> {
  pub fn is_left(&self) -> bool {
    matches!(self, Either::Left(_))
  }

  pub fn is_right(&self) -> bool {
    matches!(self, Either::Right(_))
  }

  /// Returns the left value, discarding a right one.
  pub fn left(self) -> Option<L> {
    match self {
      Either::Left(l) => Some(l),
      Either::Right(_) => None,
    }
  }

  /// Returns the right value, discarding a left one.
  pub fn right(self) -> Option<R> {
    match self {
      Either::Left(_) => None,
      Either::Right(r) => Some(r),
    }
  }

  pub fn map_left<L2>(self, f: impl FnOnce(L) -> L2) -> Either<L2, R> {
    match self {
      Either::Left(l) => Either::Left(f(l)),
      Either::Right(r) => Either::Right(r),
    }
  }

  pub fn map_right<R2>(self, f: impl FnOnce(R) -> R2) -> Either<L, R2> {
    match self {
      Either::Left(l) => Either::Left(l),
      Either::Right(r) => Either::Right(f(r)),
    }
  }

  /// Collapses both cases into a single value.
  pub fn either<T>(self, on_left: impl FnOnce(L) -> T, on_right: impl FnOnce(R) -> T) -> T {
    match self {
      Either::Left(l) => on_left(l),
      Either::Right(r) => on_right(r),
    }
  }
}
