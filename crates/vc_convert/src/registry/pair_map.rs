use core::any::TypeId;
use core::fmt::Debug;
use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

// -----------------------------------------------------------------------------
// PairHashState

/// A fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x95EE04C4F326B271);

/// Fixed Hash State based upon a random but fixed seed.
///
/// The key is two [`TypeId`]s, so unlike a single `TypeId` it cannot be
/// passed through as-is and is folded with `foldhash`.
#[derive(Copy, Clone, Default, Debug)]
pub struct PairHashState;

impl BuildHasher for PairHashState {
    type Hasher = FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// TypePairMap

/// A map keyed by an ordered pair of types, `(target, document)`.
pub struct TypePairMap<V>(HashMap<(TypeId, TypeId), V, PairHashState>);

impl<V> TypePairMap<V> {
    /// Creates an empty `TypePairMap`.
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(PairHashState))
    }

    #[inline(always)]
    fn key<T: ?Sized + 'static, D: ?Sized + 'static>() -> (TypeId, TypeId) {
        (TypeId::of::<T>(), TypeId::of::<D>())
    }

    /// Returns a reference to the value for `(T, D)`.
    #[inline]
    pub fn get<T: ?Sized + 'static, D: ?Sized + 'static>(&self) -> Option<&V> {
        self.0.get(&Self::key::<T, D>())
    }

    /// Returns a mutable reference to the value for `(T, D)`.
    #[inline]
    pub fn get_mut<T: ?Sized + 'static, D: ?Sized + 'static>(&mut self) -> Option<&mut V> {
        self.0.get_mut(&Self::key::<T, D>())
    }

    /// Gets a mutable reference to the value for `(T, D)`,
    /// inserting the result of `f` if the key is not present.
    ///
    /// The closure `f` is only called if the key is not present.
    #[inline]
    pub fn get_or_insert<T: ?Sized + 'static, D: ?Sized + 'static>(
        &mut self,
        f: impl FnOnce() -> V,
    ) -> &mut V {
        match self.0.entry(Self::key::<T, D>()) {
            Entry::Vacant(entry) => entry.insert(f()),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    /// Returns `true` if the map contains a value for `(T, D)`.
    #[inline]
    pub fn contains<T: ?Sized + 'static, D: ?Sized + 'static>(&self) -> bool {
        self.0.contains_key(&Self::key::<T, D>())
    }

    /// Returns the number of elements in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// An iterator visiting all values in arbitrary order.
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.0.values()
    }
}

impl<V> Default for TypePairMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Debug> Debug for TypePairMap<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::TypePairMap;

    #[test]
    fn pair_order_matters() {
        let mut map = TypePairMap::new();
        *map.get_or_insert::<u8, u16>(|| 1) += 10;
        map.get_or_insert::<u16, u8>(|| 2);

        assert_eq!(map.get::<u8, u16>(), Some(&11));
        assert_eq!(map.get::<u16, u8>(), Some(&2));
        assert!(!map.contains::<u8, u8>());
        assert_eq!(map.len(), 2);
    }
}
