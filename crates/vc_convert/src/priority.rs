//! Hook kinds and the fixed priority tables.
//!
//! Each table is a strict total order over disjoint kinds. This is checked
//! at compile time, so two hooks can never tie for first place.

use core::fmt;

use bitflags::bitflags;

// -----------------------------------------------------------------------------
// HookKind

/// The ways a type can take part in conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// [`ReadDocument`](crate::ReadDocument), mutates an existing value.
    InstanceMethod,
    /// [`PopulateFromDocument`](crate::PopulateFromDocument), mutates an existing value.
    StaticMutator,
    /// [`DocumentInto`](crate::DocumentInto) or [`DocumentFrom`](crate::DocumentFrom).
    NamespaceFreeFunction,
    /// [`ConstructFromDocument`](crate::ConstructFromDocument), returns a new value.
    StaticFactory,
    /// A registered [`TaggedFn`](crate::TaggedFn) or [`WriteFn`](crate::WriteFn).
    TaggedFallbackFunction,
}

impl HookKind {
    /// All kinds, in declaration order.
    pub const ALL: [HookKind; 5] = [
        Self::InstanceMethod,
        Self::StaticMutator,
        Self::NamespaceFreeFunction,
        Self::StaticFactory,
        Self::TaggedFallbackFunction,
    ];

    /// The capability flag detected for this kind when reading.
    pub const fn read_flag(self) -> Capabilities {
        match self {
            Self::InstanceMethod => Capabilities::INSTANCE_METHOD,
            Self::StaticMutator => Capabilities::STATIC_MUTATOR,
            Self::NamespaceFreeFunction => Capabilities::FREE_FUNCTION,
            Self::StaticFactory => Capabilities::STATIC_FACTORY,
            Self::TaggedFallbackFunction => Capabilities::TAGGED_FALLBACK,
        }
    }

    /// The capability flag detected for this kind when writing.
    ///
    /// Only the free function and the fallback exist in that direction.
    pub const fn write_flag(self) -> Capabilities {
        match self {
            Self::NamespaceFreeFunction => Capabilities::WRITE_FREE_FUNCTION,
            Self::TaggedFallbackFunction => Capabilities::WRITE_FALLBACK,
            _ => Capabilities::empty(),
        }
    }

    /// Returns `true` for kinds that fill an existing value.
    #[inline]
    pub const fn is_mutating(self) -> bool {
        matches!(
            self,
            Self::InstanceMethod | Self::StaticMutator | Self::NamespaceFreeFunction
        )
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InstanceMethod => "instance method",
            Self::StaticMutator => "static mutator",
            Self::NamespaceFreeFunction => "free function",
            Self::StaticFactory => "static factory",
            Self::TaggedFallbackFunction => "tagged fallback",
        })
    }
}

// -----------------------------------------------------------------------------
// Capabilities

bitflags! {
    /// The hooks detected for a `(type, document)` pair.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        const INSTANCE_METHOD     = 1 << 0;
        const STATIC_MUTATOR      = 1 << 1;
        const FREE_FUNCTION       = 1 << 2;
        const STATIC_FACTORY      = 1 << 3;
        const TAGGED_FALLBACK     = 1 << 4;
        const WRITE_FREE_FUNCTION = 1 << 5;
        const WRITE_FALLBACK      = 1 << 6;
        /// The type implements [`Default`].
        const DEFAULT             = 1 << 7;
    }
}

impl Capabilities {
    /// The constructibility class implied by [`Capabilities::DEFAULT`].
    #[inline]
    pub const fn constructibility(self) -> Constructibility {
        if self.contains(Self::DEFAULT) {
            Constructibility::Default
        } else {
            Constructibility::NonDefault
        }
    }
}

// -----------------------------------------------------------------------------
// Constructibility

/// Whether the target can be created without arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constructibility {
    /// The target implements [`Default`].
    Default,
    /// No instance exists before conversion, only value-returning hooks apply.
    NonDefault,
}

// -----------------------------------------------------------------------------
// PriorityTable

/// An ordered list of eligible hook kinds, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityTable {
    kinds: &'static [HookKind],
}

impl PriorityTable {
    /// Reading into a type implementing [`Default`].
    pub const DEFAULT: PriorityTable = PriorityTable::new(&[
        HookKind::InstanceMethod,
        HookKind::StaticMutator,
        HookKind::NamespaceFreeFunction,
        HookKind::TaggedFallbackFunction,
    ]);

    /// Reading into a type without [`Default`].
    pub const NON_DEFAULT: PriorityTable = PriorityTable::new(&[
        HookKind::StaticFactory,
        HookKind::TaggedFallbackFunction,
    ]);

    /// Writing any type.
    pub const WRITE: PriorityTable = PriorityTable::new(&[
        HookKind::NamespaceFreeFunction,
        HookKind::TaggedFallbackFunction,
    ]);

    /// Creates a table.
    ///
    /// # Panics
    ///
    /// Panics if a kind appears twice. All tables are built in constant
    /// context, so this is a compile error rather than a runtime one.
    pub const fn new(kinds: &'static [HookKind]) -> Self {
        let mut seen = [false; HookKind::ALL.len()];
        let mut i = 0;
        while i < kinds.len() {
            let index = kinds[i].index();
            assert!(!seen[index], "hook kind listed twice in a priority table");
            seen[index] = true;
            i += 1;
        }
        Self { kinds }
    }

    /// The read table for a constructibility class.
    #[inline]
    pub const fn for_class(class: Constructibility) -> Self {
        match class {
            Constructibility::Default => Self::DEFAULT,
            Constructibility::NonDefault => Self::NON_DEFAULT,
        }
    }

    /// The kinds in priority order.
    #[inline]
    pub const fn kinds(&self) -> &'static [HookKind] {
        self.kinds
    }

    /// Whether `kind` is eligible at all under this table.
    pub fn contains(&self, kind: HookKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Position of `kind`, `0` being the highest priority.
    pub fn rank(&self, kind: HookKind) -> Option<usize> {
        self.kinds.iter().position(|k| *k == kind)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Capabilities, Constructibility, HookKind, PriorityTable};

    #[test]
    fn default_table_order() {
        let table = PriorityTable::for_class(Constructibility::Default);
        assert_eq!(table.rank(HookKind::InstanceMethod), Some(0));
        assert_eq!(table.rank(HookKind::StaticMutator), Some(1));
        assert_eq!(table.rank(HookKind::NamespaceFreeFunction), Some(2));
        assert_eq!(table.rank(HookKind::TaggedFallbackFunction), Some(3));
        assert!(!table.contains(HookKind::StaticFactory));
    }

    #[test]
    fn non_default_table_only_returns_values() {
        let table = PriorityTable::for_class(Constructibility::NonDefault);
        assert_eq!(
            table.kinds(),
            &[HookKind::StaticFactory, HookKind::TaggedFallbackFunction]
        );
        assert!(table.kinds().iter().all(|kind| !kind.is_mutating()));
    }

    #[test]
    fn fallback_is_always_eligible() {
        assert!(PriorityTable::DEFAULT.contains(HookKind::TaggedFallbackFunction));
        assert!(PriorityTable::NON_DEFAULT.contains(HookKind::TaggedFallbackFunction));
        assert!(PriorityTable::WRITE.contains(HookKind::TaggedFallbackFunction));
    }

    #[test]
    #[should_panic(expected = "hook kind listed twice")]
    fn duplicate_kind_is_rejected() {
        let kinds = alloc::vec![HookKind::StaticMutator, HookKind::StaticMutator];
        PriorityTable::new(kinds.leak());
    }

    #[test]
    fn flags_are_disjoint() {
        let mut all = Capabilities::empty();
        for kind in HookKind::ALL {
            assert!(!all.intersects(kind.read_flag()));
            all |= kind.read_flag();
        }
        assert_eq!(HookKind::StaticFactory.write_flag(), Capabilities::empty());
    }

    #[test]
    fn constructibility_from_flags() {
        assert_eq!(
            Capabilities::DEFAULT.constructibility(),
            Constructibility::Default
        );
        assert_eq!(
            Capabilities::STATIC_FACTORY.constructibility(),
            Constructibility::NonDefault
        );
    }
}
