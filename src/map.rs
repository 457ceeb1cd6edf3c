use crate::{assert_enumerable_safe, Enumerable, LengthMismatch};
use core::marker::PhantomData;
use core::mem::MaybeUninit;

/// A total map from the members of `K` to values of type `V`.
///
/// The map is O(1) for all operations. Every member of `K` has a value for
/// the whole lifetime of the map: construction always produces a value for
/// every slot, so there is no way to insert or remove entries, and lookups
/// cannot miss. Because of this it can be indexed into using the key type.
///
/// `N` must equal `K::COUNT`; it is a separate parameter only because
/// associated consts cannot size arrays yet.
#[must_use]
pub struct EnumMap<K, V, const N: usize> {
  pub(crate) array: [V; N],
  pub(crate) phantom: PhantomData<*const K>,
}

#[allow(unsafe_code)]
unsafe impl<K, V: Send, const N: usize> Send for EnumMap<K, V, N> {}
#[allow(unsafe_code)]
unsafe impl<K, V: Sync, const N: usize> Sync for EnumMap<K, V, N> {}
impl<K, V: Unpin, const N: usize> Unpin for EnumMap<K, V, N> {}
#[cfg(feature = "std")]
impl<K, V: std::panic::UnwindSafe, const N: usize> std::panic::UnwindSafe for EnumMap<K, V, N> {}

impl<K, V, const N: usize> EnumMap<K, V, N> {
  /// Wraps an array of exactly `N` values, slot `i` serving the key with
  /// ordinal `i`. Usable in const contexts; the length match is static.
  pub const fn new(array: [V; N]) -> Self {
    Self {
      array,
      phantom: PhantomData,
    }
  }
}

impl<K: Enumerable, V: Clone, const N: usize> EnumMap<K, V, N> {
  /// Returns a new [`EnumMap`] where all the values are initialized to the same value
  /// # Panics
  /// Panics if `N` is not `K::COUNT`
  #[inline(always)]
  pub fn from_value(value: V) -> Self {
    Self::from_closure(|_| value.clone())
  }
}

impl<K, V: Clone, const N: usize> Clone for EnumMap<K, V, N> {
  #[inline(always)]
  fn clone(&self) -> Self {
    Self {
      array: self.array.clone(),
      phantom: PhantomData,
    }
  }
}

impl<K, V: Copy, const N: usize> Copy for EnumMap<K, V, N> {}

impl<K, V: PartialEq, const N: usize> PartialEq for EnumMap<K, V, N> {
  fn eq(&self, other: &Self) -> bool {
    self.array.eq(&other.array)
  }
}

impl<K, V: Eq, const N: usize> Eq for EnumMap<K, V, N> {}

impl<K: core::fmt::Debug + Enumerable, V: core::fmt::Debug, const N: usize> core::fmt::Debug for EnumMap<K, V, N> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    assert_eq!(N, K::COUNT);
    f.debug_map().entries(self.iter()).finish()
  }
}

// Drops the initialized slots of a partially filled array. Used by the
// fallible constructors before abandoning the storage.
#[allow(unsafe_code)]
fn drop_filled<V, const N: usize>(array: &mut MaybeUninit<[V; N]>, filled: &[bool; N]) {
  if core::mem::needs_drop::<V>() {
    for index in filled.iter().copied().enumerate().filter_map(|(i, b)| b.then_some(i)) {
      // Safety: only slots marked filled have been initialized, and each is
      // dropped exactly once before the storage is discarded.
      unsafe { core::ptr::drop_in_place(array.as_mut_ptr().cast::<V>().add(index)) };
    }
  }
}

impl<K: Enumerable, V, const N: usize> EnumMap<K, V, N> {
  /// Returns a new [`EnumMap`] where each value is the return of the closure
  /// called with that slot's key, in ordinal order.
  /// # Panics
  /// Panics if `N` is not `K::COUNT` or if any of the safety requirements in
  /// the [`Enumerable`] trait are wrong
  pub fn from_closure(mut f: impl FnMut(&K) -> V) -> Self {
    match Self::try_from_closure(|k| Ok::<_, core::convert::Infallible>(f(k))) {
      Ok(map) => map,
      Err(never) => match never {},
    }
  }

  /// Fallible version of [`from_closure`](Self::from_closure). Values built
  /// before the first error are dropped and the error is returned as-is.
  /// # Errors
  /// Returns an error the first time that the provided closure returns an error.
  /// # Panics
  /// Panics if `N` is not `K::COUNT` or if any of the safety requirements in
  /// the [`Enumerable`] trait are wrong
  #[allow(unsafe_code)]
  pub fn try_from_closure<E>(mut f: impl FnMut(&K) -> Result<V, E>) -> Result<Self, E> {
    assert_eq!(N, K::COUNT);
    assert_enumerable_safe::<K>();
    let mut array = MaybeUninit::<[V; N]>::uninit();
    let mut filled = [false; N];
    for k in K::iter() {
      match f(&k) {
        Ok(v) => {
          let ordinal = k.ordinal();
          assert!(ordinal < N);
          // Safety: we only write to slots without reading them.
          unsafe { array.as_mut_ptr().cast::<V>().add(ordinal).write(v) };
          filled[ordinal] = true;
        }
        Err(e) => {
          drop_filled(&mut array, &filled);
          return Err(e);
        }
      }
    }
    assert!(
      filled.iter().all(|f| *f),
      "Not all ordinals have been set. Enumerable::ordinal() for {} probably isn't unique",
      core::any::type_name::<K>()
    );
    Ok(Self {
      // Safety: we have ensured all slots are initialized.
      array: unsafe { array.assume_init() },
      phantom: PhantomData,
    })
  }

  /// Returns a new [`EnumMap`] that consumes exactly `N` values positionally,
  /// slot `i` serving the key with ordinal `i`.
  ///
  /// The sequence is drained eagerly: a surplus is never truncated and a
  /// shortfall is never padded, the construction fails instead.
  /// # Errors
  /// Returns [`LengthMismatch`] if the sequence yields fewer or more than `N`
  /// values. `actual` reports the sequence's full length, so a sequence that
  /// is too long is consumed to its end.
  /// # Panics
  /// Panics if `N` is not `K::COUNT`
  #[allow(unsafe_code)]
  pub fn try_from_values<I: IntoIterator<Item = V>>(values: I) -> Result<Self, LengthMismatch> {
    assert_eq!(N, K::COUNT);
    assert_enumerable_safe::<K>();
    let mut values = values.into_iter();
    let mut array = MaybeUninit::<[V; N]>::uninit();
    let mut filled = [false; N];
    for index in 0..N {
      match values.next() {
        Some(v) => {
          // Safety: we only write to slots without reading them.
          unsafe { array.as_mut_ptr().cast::<V>().add(index).write(v) };
          filled[index] = true;
        }
        None => {
          drop_filled(&mut array, &filled);
          return Err(LengthMismatch {
            expected: N,
            actual: index,
          });
        }
      }
    }
    let surplus = values.count();
    if surplus > 0 {
      drop_filled(&mut array, &filled);
      return Err(LengthMismatch {
        expected: N,
        actual: N + surplus,
      });
    }
    Ok(Self {
      // Safety: the loop above initialized every slot in `0..N`.
      array: unsafe { array.assume_init() },
      phantom: PhantomData,
    })
  }

  /// Replaces every value in the map with the values of the given sequence,
  /// positionally.
  ///
  /// The sequence is validated into a temporary first; the map never ends up
  /// partially overwritten.
  /// # Errors
  /// Returns [`LengthMismatch`] if the sequence yields fewer or more than `N`
  /// values. The map is left untouched.
  /// # Panics
  /// Panics if `N` is not `K::COUNT`
  pub fn try_assign<I: IntoIterator<Item = V>>(&mut self, values: I) -> Result<(), LengthMismatch> {
    *self = Self::try_from_values(values)?;
    Ok(())
  }
}

impl<K: Enumerable, V: Default, const N: usize> EnumMap<K, V, N> {
  /// Returns a new [`EnumMap`] with the given values stored at their keys'
  /// slots and `V::default()` everywhere else.
  ///
  /// A key may appear more than once; the last value given for it wins. This
  /// is intentional, so a base association can be layered over with overrides.
  /// # Panics
  /// Panics if `N` is not `K::COUNT`
  pub fn from_sparse<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
    let mut map = Self::default();
    for (k, v) in pairs {
      map.array[k.ordinal()] = v;
    }
    map
  }
}

impl<K: Enumerable, V: Default, const N: usize> core::iter::FromIterator<(K, V)> for EnumMap<K, V, N> {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self::from_sparse(iter)
  }
}

impl<K: Enumerable, V: Default, const N: usize> Default for EnumMap<K, V, N> {
  #[inline(always)]
  fn default() -> Self {
    Self::from_closure(|_| V::default())
  }
}

impl<K: Enumerable, V, const N: usize> EnumMap<K, V, N> {
  /// Returns a reference to the value stored for `key`.
  ///
  /// `key` is statically a member of `K`, so the lookup cannot miss.
  /// # Panics
  /// Panics if `N` is not `K::COUNT`
  #[inline(always)]
  #[must_use]
  pub fn get(&self, key: K) -> &V {
    assert_eq!(N, K::COUNT);
    &self.array[key.ordinal()]
  }

  /// Returns a mutable reference to the value stored for `key`.
  /// # Panics
  /// Panics if `N` is not `K::COUNT`
  #[inline(always)]
  #[must_use]
  pub fn get_mut(&mut self, key: K) -> &mut V {
    assert_eq!(N, K::COUNT);
    &mut self.array[key.ordinal()]
  }

  /// Stores `value` for `key`, dropping the previous value.
  /// # Panics
  /// Panics if `N` is not `K::COUNT`
  #[inline(always)]
  pub fn set(&mut self, key: K, value: V) {
    *self.get_mut(key) = value;
  }

  /// Returns an iterator over all the items in the map, in ordinal order.
  /// Note that the keys are owned and the values are read-only; updating
  /// during pair iteration goes through [`iter_mut`](Self::iter_mut) or
  /// indexed access instead.
  /// # Panics
  /// Panics if `N` is not `K::COUNT` or if any of the safety requirements in
  /// the [`Enumerable`] trait are wrong
  #[inline(always)]
  #[must_use]
  pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + '_ {
    assert_eq!(N, K::COUNT);
    assert_enumerable_safe::<K>();
    K::iter().zip(self.array.iter())
  }

  /// Returns an iterator over all the items in the map with the value
  /// mutable, so a single pass can update every slot in place.
  /// # Panics
  /// Panics if `N` is not `K::COUNT` or if any of the safety requirements in
  /// the [`Enumerable`] trait are wrong
  #[inline(always)]
  #[must_use]
  pub fn iter_mut(&mut self) -> impl Iterator<Item = (K, &mut V)> + '_ {
    assert_eq!(N, K::COUNT);
    assert_enumerable_safe::<K>();
    K::iter().zip(self.array.iter_mut())
  }

  /// Returns an iterator over all the keys of the map, in ordinal order. The
  /// keys are owned and independent of the stored values; any two maps over
  /// the same `K` yield the same keys.
  #[inline(always)]
  #[must_use]
  #[allow(clippy::unused_self)]
  pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
    K::iter()
  }
}

impl<K, V, const N: usize> EnumMap<K, V, N> {
  /// Returns an iterator over all the values in the map, in ordinal order
  #[inline]
  #[must_use]
  pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
    self.array.iter()
  }
  /// Returns a mutable iterator over all the values in the map, in ordinal
  /// order. Writes through the iterator land in the map.
  #[inline]
  #[must_use]
  pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
    self.array.iter_mut()
  }
}

impl<K: Enumerable, V, const N: usize> core::iter::IntoIterator for EnumMap<K, V, N> {
  type Item = (K, V);
  type IntoIter = core::iter::Zip<K::Iter, core::array::IntoIter<V, N>>;

  fn into_iter(self) -> Self::IntoIter {
    K::iter().zip(self.array)
  }
}

impl<K, V, const N: usize> core::convert::AsRef<[V; N]> for EnumMap<K, V, N> {
  #[inline(always)]
  fn as_ref(&self) -> &[V; N] {
    &self.array
  }
}

impl<K, V, const N: usize> core::convert::AsMut<[V; N]> for EnumMap<K, V, N> {
  #[inline(always)]
  fn as_mut(&mut self) -> &mut [V; N] {
    &mut self.array
  }
}

impl<K: Enumerable, V, const N: usize> core::ops::Index<K> for EnumMap<K, V, N> {
  type Output = V;

  #[inline(always)]
  fn index(&self, index: K) -> &Self::Output {
    self.get(index)
  }
}

impl<K: Enumerable, V, const N: usize> core::ops::IndexMut<K> for EnumMap<K, V, N> {
  #[inline(always)]
  fn index_mut(&mut self, index: K) -> &mut Self::Output {
    self.get_mut(index)
  }
}

/// Builds an [`EnumMap`] from a flat list of alternating keys and values.
///
/// Keys that never appear are filled with `V::default()`. A key may appear
/// more than once; the last value given for it wins. A list with a trailing
/// key and no value doesn't match the macro and is rejected at compile time,
/// as is a key or value of the wrong type.
///
/// The number of slots cannot be inferred from the argument list alone, so
/// the expression needs its map type from context:
/// ```
/// use enum_map::*;
/// # use enum_map_derive::Enumerable;
/// # #[derive(Copy, Clone, Enumerable)]
/// # enum Element { Air, Earth, Water, Fire }
/// let a: EnumMap<Element, i32, { Element::count() }> = enum_map![Element::Water, 4, Element::Air, 3];
/// assert_eq!(a.get(Element::Water), &4);
/// assert_eq!(a.get(Element::Earth), &0);
/// ```
#[macro_export]
macro_rules! enum_map {
  ($($key:expr, $value:expr),* $(,)?) => {
    $crate::EnumMap::from_sparse([$(($key, $value)),*])
  };
}
