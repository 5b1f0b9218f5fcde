//! Dispatch resolver.
//!
//! Combines the prober output with the [priority tables](crate::priority)
//! and selects exactly one hook per direction. The result only depends on
//! the detected hooks, never on call order or runtime state.

use core::fmt;

use crate::adapter::{Construct, Populate, Write};
use crate::error::ConversionError;
use crate::hook::DefaultFn;
use crate::priority::{Capabilities, Constructibility, HookKind, PriorityTable};
use crate::probe::HookSet;

// -----------------------------------------------------------------------------
// Flag-level resolution

/// Picks the winning read hook from detected flags.
///
/// Returns `None` when nothing under the applicable table was detected.
///
/// # Examples
///
/// ```
/// use vc_convert::priority::{Capabilities, Constructibility, HookKind};
/// use vc_convert::resolve::resolve;
///
/// let caps = Capabilities::STATIC_MUTATOR | Capabilities::FREE_FUNCTION;
/// assert_eq!(
///     resolve(caps, Constructibility::Default),
///     Some(HookKind::StaticMutator),
/// );
/// assert_eq!(resolve(caps, Constructibility::NonDefault), None);
/// ```
pub fn resolve(caps: Capabilities, class: Constructibility) -> Option<HookKind> {
    PriorityTable::for_class(class)
        .kinds()
        .iter()
        .copied()
        .find(|kind| caps.contains(kind.read_flag()))
}

/// Picks the winning write hook from detected flags.
pub fn resolve_write(caps: Capabilities) -> Option<HookKind> {
    PriorityTable::WRITE
        .kinds()
        .iter()
        .copied()
        .find(|kind| caps.contains(kind.write_flag()))
}

// -----------------------------------------------------------------------------
// ReadPlan

/// The resolved way to read a `T` out of a `D`.
pub enum ReadPlan<T, D> {
    /// Default-construct, then run a mutating hook on the new value.
    Populate {
        ctor: DefaultFn<T>,
        adapter: Populate<T, D>,
    },
    /// Run a value-returning hook.
    Construct(Construct<T, D>),
}

impl<T, D> ReadPlan<T, D> {
    /// Builds the plan for the highest-priority hook in `hooks`.
    pub fn resolve(hooks: &HookSet<T, D>) -> Option<Self> {
        let plan = PriorityTable::for_class(hooks.constructibility())
            .kinds()
            .iter()
            .find_map(|&kind| Self::for_kind(hooks, kind));

        debug_assert_eq!(
            plan.as_ref().map(Self::kind),
            resolve(hooks.capabilities(), hooks.constructibility()),
            "plan and flag resolution disagree",
        );
        plan
    }

    fn for_kind(hooks: &HookSet<T, D>, kind: HookKind) -> Option<Self> {
        if kind.is_mutating() {
            Some(Self::Populate {
                ctor: hooks.default_ctor?,
                adapter: hooks.populate(kind)?,
            })
        } else {
            hooks.construct(kind).map(Self::Construct)
        }
    }

    /// The hook kind this plan runs.
    pub fn kind(&self) -> HookKind {
        match self {
            Self::Populate { adapter, .. } => adapter.kind(),
            Self::Construct(adapter) => adapter.kind(),
        }
    }

    /// Produces a new value.
    pub fn read(&self, doc: &D) -> Result<T, ConversionError> {
        match self {
            Self::Populate { ctor, adapter } => {
                let mut value = ctor();
                adapter.populate(&mut value, doc)?;
                Ok(value)
            }
            Self::Construct(adapter) => adapter.construct(doc),
        }
    }

    /// Fills an existing value.
    ///
    /// A mutating hook runs in place, a value-returning hook replaces `target`.
    /// `target` is left untouched when a value-returning hook fails.
    pub fn read_into(&self, doc: &D, target: &mut T) -> Result<(), ConversionError> {
        match self {
            Self::Populate { adapter, .. } => adapter.populate(target, doc),
            Self::Construct(adapter) => {
                *target = adapter.construct(doc)?;
                Ok(())
            }
        }
    }
}

impl<T, D> Clone for ReadPlan<T, D> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, D> Copy for ReadPlan<T, D> {}

impl<T, D> fmt::Debug for ReadPlan<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReadPlan").field(&self.kind()).finish()
    }
}

// -----------------------------------------------------------------------------
// WritePlan

/// The resolved way to write a `T` into a `D`.
pub struct WritePlan<T, D>(Write<T, D>);

impl<T, D> WritePlan<T, D> {
    /// Builds the plan for the highest-priority write hook in `hooks`.
    pub fn resolve(hooks: &HookSet<T, D>) -> Option<Self> {
        let plan = PriorityTable::WRITE
            .kinds()
            .iter()
            .find_map(|&kind| hooks.write(kind))
            .map(Self);

        debug_assert_eq!(
            plan.as_ref().map(Self::kind),
            resolve_write(hooks.capabilities()),
            "plan and flag resolution disagree",
        );
        plan
    }

    #[inline]
    pub fn kind(&self) -> HookKind {
        self.0.kind()
    }

    #[inline]
    pub fn write(&self, doc: &mut D, value: &T) -> Result<(), ConversionError> {
        self.0.write(doc, value)
    }
}

impl<T, D> Clone for WritePlan<T, D> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, D> Copy for WritePlan<T, D> {}

impl<T, D> fmt::Debug for WritePlan<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WritePlan").field(&self.kind()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{ReadPlan, WritePlan, resolve, resolve_write};
    use crate::ConversionError;
    use crate::hook::Tag;
    use crate::priority::{Capabilities, Constructibility, HookKind};
    use crate::probe::HookSet;

    const DEFAULT: Constructibility = Constructibility::Default;
    const NON_DEFAULT: Constructibility = Constructibility::NonDefault;

    #[test]
    fn nothing_detected() {
        assert_eq!(resolve(Capabilities::empty(), DEFAULT), None);
        assert_eq!(resolve(Capabilities::empty(), NON_DEFAULT), None);
        assert_eq!(resolve_write(Capabilities::empty()), None);
    }

    #[test]
    fn default_priorities() {
        let all = Capabilities::INSTANCE_METHOD
            | Capabilities::STATIC_MUTATOR
            | Capabilities::FREE_FUNCTION
            | Capabilities::STATIC_FACTORY
            | Capabilities::TAGGED_FALLBACK;

        assert_eq!(resolve(all, DEFAULT), Some(HookKind::InstanceMethod));

        let caps = all - Capabilities::INSTANCE_METHOD;
        assert_eq!(resolve(caps, DEFAULT), Some(HookKind::StaticMutator));

        let caps = caps - Capabilities::STATIC_MUTATOR;
        assert_eq!(resolve(caps, DEFAULT), Some(HookKind::NamespaceFreeFunction));

        let caps = caps - Capabilities::FREE_FUNCTION;
        assert_eq!(resolve(caps, DEFAULT), Some(HookKind::TaggedFallbackFunction));

        // A factory alone is not eligible for default-constructible types.
        assert_eq!(resolve(Capabilities::STATIC_FACTORY, DEFAULT), None);
    }

    #[test]
    fn non_default_priorities() {
        let caps = Capabilities::INSTANCE_METHOD
            | Capabilities::STATIC_MUTATOR
            | Capabilities::FREE_FUNCTION
            | Capabilities::STATIC_FACTORY
            | Capabilities::TAGGED_FALLBACK;

        assert_eq!(resolve(caps, NON_DEFAULT), Some(HookKind::StaticFactory));

        let caps = caps - Capabilities::STATIC_FACTORY;
        assert_eq!(resolve(caps, NON_DEFAULT), Some(HookKind::TaggedFallbackFunction));

        let caps = caps - Capabilities::TAGGED_FALLBACK;
        assert_eq!(resolve(caps, NON_DEFAULT), None);
    }

    #[test]
    fn write_priorities() {
        let caps = Capabilities::WRITE_FREE_FUNCTION | Capabilities::WRITE_FALLBACK;
        assert_eq!(resolve_write(caps), Some(HookKind::NamespaceFreeFunction));
        assert_eq!(
            resolve_write(Capabilities::WRITE_FALLBACK),
            Some(HookKind::TaggedFallbackFunction)
        );
    }

    fn add_one(target: &mut i32, doc: &i32) -> Result<(), ConversionError> {
        *target += doc + 1;
        Ok(())
    }

    fn fallback(doc: &i32, _: Tag<i32>) -> Result<i32, ConversionError> {
        Ok(doc * 10)
    }

    fn refuse(_: &i32) -> Result<i32, ConversionError> {
        Err(ConversionError::construction::<i32>("refused"))
    }

    fn write_twice(doc: &mut i32, value: &i32) -> Result<(), ConversionError> {
        *doc = value * 2;
        Ok(())
    }

    #[test]
    fn populate_plan_starts_from_default() {
        let mut hooks = HookSet::<i32, i32>::empty();
        hooks.default_ctor = Some(i32::default);
        hooks.static_mutator = Some(add_one);
        hooks.tagged_fallback = Some(fallback);

        let plan = ReadPlan::resolve(&hooks).unwrap();
        assert_eq!(plan.kind(), HookKind::StaticMutator);
        assert_eq!(plan.read(&4).unwrap(), 5);

        let mut existing = 10;
        plan.read_into(&4, &mut existing).unwrap();
        assert_eq!(existing, 15);
    }

    #[test]
    fn construct_plan_replaces_value() {
        let mut hooks = HookSet::<i32, i32>::empty();
        hooks.tagged_fallback = Some(fallback);

        let plan = ReadPlan::resolve(&hooks).unwrap();
        assert_eq!(plan.kind(), HookKind::TaggedFallbackFunction);

        let mut existing = 10;
        plan.read_into(&4, &mut existing).unwrap();
        assert_eq!(existing, 40);
    }

    #[test]
    fn failed_construct_keeps_target() {
        let mut hooks = HookSet::<i32, i32>::empty();
        hooks.static_factory = Some(refuse);
        hooks.tagged_fallback = Some(fallback);

        let plan = ReadPlan::resolve(&hooks).unwrap();
        assert_eq!(plan.kind(), HookKind::StaticFactory);

        let mut existing = 10;
        let err = plan.read_into(&4, &mut existing).unwrap_err();
        assert!(matches!(err, ConversionError::ConstructionFailure { .. }));
        assert_eq!(existing, 10);
    }

    #[test]
    fn write_plan() {
        let mut hooks = HookSet::<i32, i32>::empty();
        assert!(WritePlan::resolve(&hooks).is_none());

        hooks.write_fallback = Some(write_twice);
        let plan = WritePlan::resolve(&hooks).unwrap();
        assert_eq!(plan.kind(), HookKind::TaggedFallbackFunction);

        let mut doc = 0;
        plan.write(&mut doc, &21).unwrap();
        assert_eq!(doc, 42);
    }
}
