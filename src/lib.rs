#![cfg_attr(not(test), deny(warnings, clippy::all, clippy::pedantic, clippy::cargo, missing_docs))]
#![deny(unsafe_code)]
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![allow(clippy::module_name_repetitions, clippy::inline_always)]

//! `no_std` compatible total map from the members of a fixed enumeration to
//! values, backed by an array.
//!
//! [`EnumMap`] holds exactly one value per member of its key type: every key
//! has a value at all times, there is no missing state, and every operation is
//! O(1) over fixed-size storage with no allocation.
//!
//! Features:
//! * `derive`: Includes the `Enumerable` derive macro
//! * `std`: Implements `std::error::Error` for [`LengthMismatch`]
//!
//! This is especially useful if you have a bare enum where you want to treat
//! each member as a field. The derive generates named accessors for each
//! member, so adding a new member forces you to update code that spells the
//! old ones out.
//! ```
//! use enum_map::*;
//! # use enum_map_derive::Enumerable;
//! #[derive(Copy, Clone, Debug, PartialEq, Eq, Enumerable)]
//! enum Element {
//!   Air,
//!   Earth,
//!   Water,
//!   Fire,
//! }
//!
//! let a = enum_map![Element::Water, 4, Element::Air, 3];
//! let b: EnumMap<Element, i32, { Element::count() }> = enum_map![Element::Water, 5, Element::Fire, 2];
//! let sum = a + b;
//! assert_eq!(sum.get(Element::Water), &9);
//! assert_eq!(sum.water(), &9);
//! assert_eq!(sum.earth(), &0);
//! ```
//!
//! Maps of the same shape combine element-wise, so per-key tallies can be
//! merged without spelling the keys out:
//! ```
//! use enum_map::*;
//! # use enum_map_derive::Enumerable;
//! # #[derive(Copy, Clone, Enumerable)]
//! # enum Element { Air, Earth, Water, Fire }
//! let mut total = EnumMap::<Element, u32, { Element::count() }>::default();
//! for batch in [[1, 0, 2, 0], [0, 3, 1, 1]] {
//!   total += EnumMap::new(batch);
//! }
//! assert_eq!(total.values().copied().collect::<Vec<_>>(), vec![1, 3, 3, 1]);
//! ```

mod error;
mod map;
mod ops;

#[cfg(feature = "enum_map_derive")]
pub use enum_map_derive::Enumerable;
pub use error::*;
pub use map::*;

/// Maps a type onto the ordinals `0..COUNT`
///
/// # Safety
/// [`EnumMap`] relies on properties of this trait the compiler cannot check:
/// * `ordinal()` must return each value in `0..COUNT` for exactly one member
/// * `iter()` must yield exactly `COUNT` members, in ordinal order
///
/// Types whose members are not consecutive integers starting at 0 cannot
/// implement this trait; the derive macro rejects them, and hand-written
/// impls are checked in debug mode every time a map is built.
#[allow(unsafe_code)]
pub unsafe trait Enumerable {
  /// The number of members this type has.
  const COUNT: usize;
  /// The type of iterator that will be returned by [`Self::iter()`]
  type Iter: Iterator<Item = Self>;
  /// Maps self to its ordinal to know which slot in the underlying array to use
  /// # Safety
  /// This value must be less than [`Self::COUNT`]
  ///
  /// All values in `0..COUNT` must be returned by some member of self.
  fn ordinal(self) -> usize;
  /// An iterator over all members of `self`, in ordinal order
  /// # Safety
  /// This iterator must yield exactly [`Self::COUNT`] items
  fn iter() -> Self::Iter;
}

#[inline(always)]
pub(crate) fn assert_enumerable_safe<K: Enumerable>() {
  #[cfg(debug_assertions)]
  {
    let mut total = 0_usize;
    for (position, key) in K::iter().enumerate().take(K::COUNT + 1) {
      assert_eq!(
        key.ordinal(),
        position,
        "Enumerable::iter() for {} doesn't yield members in ordinal order",
        core::any::type_name::<K>()
      );
      total += 1;
    }
    assert_eq!(
      total,
      K::COUNT,
      "Enumerable::iter() for {} doesn't yield COUNT members",
      core::any::type_name::<K>()
    );
  }
}

#[allow(unsafe_code)]
unsafe impl Enumerable for bool {
  const COUNT: usize = 2;
  type Iter = core::array::IntoIter<bool, 2>;
  #[inline(always)]
  fn ordinal(self) -> usize {
    usize::from(self)
  }
  #[inline(always)]
  fn iter() -> Self::Iter {
    [false, true].into_iter()
  }
}

#[allow(unsafe_code)]
unsafe impl Enumerable for u8 {
  const COUNT: usize = u8::MAX as usize + 1;
  type Iter = core::ops::RangeInclusive<Self>;
  #[inline(always)]
  fn ordinal(self) -> usize {
    usize::from(self)
  }
  #[inline(always)]
  fn iter() -> Self::Iter {
    Self::MIN..=Self::MAX
  }
}

#[allow(unsafe_code)]
unsafe impl<T: Enumerable> Enumerable for Option<T> {
  const COUNT: usize = T::COUNT + 1;
  #[allow(clippy::type_complexity)]
  type Iter = core::iter::Chain<core::iter::Map<T::Iter, fn(T) -> Option<T>>, core::iter::Once<Option<T>>>;

  fn ordinal(self) -> usize {
    match self {
      Some(x) => x.ordinal(),
      None => T::COUNT,
    }
  }

  fn iter() -> Self::Iter {
    T::iter().map(Some as fn(T) -> Option<T>).chain(core::iter::once(None))
  }
}
