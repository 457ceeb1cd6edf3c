use crate::EnumMap;
use core::marker::PhantomData;
use core::mem::MaybeUninit;

impl<K, V, const N: usize> EnumMap<K, V, N> {
  /// Combines two maps over the same keys slot by slot, producing a new map
  /// where each key's value is `f(self[key], other[key])`.
  ///
  /// Slots are combined independently; the order they are visited in is
  /// unspecified. This is the general form of the arithmetic operators below,
  /// usable for value types without operators (string concatenation, min/max,
  /// saturating arithmetic).
  #[allow(unsafe_code)]
  pub fn zip_with<W, U>(self, other: EnumMap<K, W, N>, mut f: impl FnMut(V, W) -> U) -> EnumMap<K, U, N> {
    let mut array = MaybeUninit::<[U; N]>::uninit();
    for (index, (l, r)) in self.array.into_iter().zip(other.array).enumerate() {
      // Safety: zipping two arrays of N yields one value per slot, and we
      // only write to slots without reading them.
      unsafe { array.as_mut_ptr().cast::<U>().add(index).write(f(l, r)) };
    }
    EnumMap {
      // Safety: the loop above initialized every slot in `0..N`.
      array: unsafe { array.assume_init() },
      phantom: PhantomData,
    }
  }

  /// Transforms each value independently, keeping every value at its key's
  /// slot.
  #[allow(unsafe_code)]
  pub fn map<U>(self, mut f: impl FnMut(V) -> U) -> EnumMap<K, U, N> {
    let mut array = MaybeUninit::<[U; N]>::uninit();
    for (index, v) in self.array.into_iter().enumerate() {
      // Safety: we only write to slots without reading them.
      unsafe { array.as_mut_ptr().cast::<U>().add(index).write(f(v)) };
    }
    EnumMap {
      // Safety: the loop above initialized every slot in `0..N`.
      array: unsafe { array.assume_init() },
      phantom: PhantomData,
    }
  }
}

// The operators are plain per-slot forwarding, so they are stamped out by
// macro. Each impl requires exactly the capability it forwards to on `V` and
// nothing else.
macro_rules! element_wise {
  ($op:ident, $method:ident, $assign:ident, $assign_method:ident) => {
    impl<K, V: core::ops::$op<Output = V>, const N: usize> core::ops::$op for EnumMap<K, V, N> {
      type Output = Self;

      #[inline]
      fn $method(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, core::ops::$op::$method)
      }
    }

    impl<K, V: core::ops::$assign, const N: usize> core::ops::$assign for EnumMap<K, V, N> {
      #[inline]
      fn $assign_method(&mut self, rhs: Self) {
        for (l, r) in self.array.iter_mut().zip(rhs.array) {
          l.$assign_method(r);
        }
      }
    }
  };
}

element_wise!(Add, add, AddAssign, add_assign);
element_wise!(Sub, sub, SubAssign, sub_assign);
element_wise!(Mul, mul, MulAssign, mul_assign);
element_wise!(Div, div, DivAssign, div_assign);
element_wise!(BitAnd, bitand, BitAndAssign, bitand_assign);
element_wise!(BitOr, bitor, BitOrAssign, bitor_assign);
element_wise!(BitXor, bitxor, BitXorAssign, bitxor_assign);

macro_rules! element_wise_unary {
  ($op:ident, $method:ident) => {
    impl<K, V: core::ops::$op<Output = V>, const N: usize> core::ops::$op for EnumMap<K, V, N> {
      type Output = Self;

      #[inline]
      fn $method(self) -> Self::Output {
        self.map(core::ops::$op::$method)
      }
    }
  };
}

element_wise_unary!(Neg, neg);
element_wise_unary!(Not, not);
