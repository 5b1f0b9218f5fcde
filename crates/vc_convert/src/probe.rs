//! Capability prober.
//!
//! Finds out which hooks a `(T, D)` pair defines without running any of them.
//!
//! Detection uses method resolution on a [`Probe`]: every hook has a
//! `Detect*` trait implemented for `Probe<T, D>` when the hook trait holds,
//! and a `Missing*` trait implemented for `&Probe<T, D>` unconditionally.
//! Calling `(&probe).method()` picks the `Detect*` impl first, and only falls
//! back to the auto-referenced `Missing*` impl when the bound does not hold.
//!
//! This only works for concrete types, so detection happens inside
//! [`probe_hooks!`](crate::probe_hooks), expanded at the use site.
//! A hook whose signature differs in any way does not implement the hook
//! trait, so it is simply not detected.
//!
//! # Examples
//!
//! ```
//! # #[cfg(feature = "json")] {
//! use serde_json::Value;
//! use vc_convert::{ConversionError, ReadDocument, probe::HookSet, priority::Capabilities};
//!
//! #[derive(Default)]
//! struct Cat;
//!
//! impl ReadDocument<Value> for Cat {
//!     fn read_document(&mut self, _: &Value) -> Result<(), ConversionError> {
//!         Ok(())
//!     }
//! }
//!
//! let hooks: HookSet<Cat, Value> = vc_convert::probe_hooks!(Cat, Value);
//!
//! assert_eq!(
//!     hooks.capabilities(),
//!     Capabilities::DEFAULT | Capabilities::INSTANCE_METHOD,
//! );
//! # }
//! ```

use core::fmt;
use core::marker::PhantomData;

use crate::adapter::{self, Construct, Populate, Write};
use crate::document::Document;
use crate::hook::{ConstructFn, DefaultFn, PopulateFn, TaggedFn, WriteFn};
use crate::hook::{ConstructFromDocument, DocumentFrom, DocumentInto};
use crate::hook::{PopulateFromDocument, ReadDocument};
use crate::priority::{Capabilities, Constructibility, HookKind};

// -----------------------------------------------------------------------------
// Probe

/// A zero-sized stand-in for `(T, D)` used for hook detection.
pub struct Probe<T, D>(PhantomData<fn() -> (T, D)>);

impl<T, D> Probe<T, D> {
    #[inline(always)]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

/// Detection traits, glob-imported by [`probe_hooks!`](crate::probe_hooks).
#[doc(hidden)]
pub mod detect {
    use super::*;

    macro_rules! detector {
        (
            $detect:ident, $missing:ident, $method:ident -> $out:ty,
            where [$($bound:tt)*] => $found:expr
        ) => {
            pub trait $detect<T, D> {
                fn $method(&self) -> Option<$out>;
            }

            impl<T, D> $detect<T, D> for Probe<T, D>
            where
                $($bound)*
            {
                #[inline(always)]
                fn $method(&self) -> Option<$out> {
                    Some($found)
                }
            }

            pub trait $missing<T, D> {
                fn $method(&self) -> Option<$out>;
            }

            impl<T, D> $missing<T, D> for &Probe<T, D> {
                #[inline(always)]
                fn $method(&self) -> Option<$out> {
                    None
                }
            }
        };
    }

    detector! {
        DetectDefault, MissingDefault, default_ctor -> DefaultFn<T>,
        where [T: Default] => <T as Default>::default
    }

    detector! {
        DetectInstanceMethod, MissingInstanceMethod, instance_method -> PopulateFn<T, D>,
        where [T: ReadDocument<D>, D: Document] => adapter::instance_method::<T, D>
    }

    detector! {
        DetectStaticMutator, MissingStaticMutator, static_mutator -> PopulateFn<T, D>,
        where [T: PopulateFromDocument<D>, D: Document] => adapter::static_mutator::<T, D>
    }

    detector! {
        DetectFreeFunction, MissingFreeFunction, free_function -> PopulateFn<T, D>,
        where [D: DocumentInto<T>] => adapter::free_function::<T, D>
    }

    detector! {
        DetectStaticFactory, MissingStaticFactory, static_factory -> ConstructFn<T, D>,
        where [T: ConstructFromDocument<D>, D: Document] => adapter::static_factory::<T, D>
    }

    detector! {
        DetectFreeWriter, MissingFreeWriter, free_writer -> WriteFn<T, D>,
        where [D: DocumentFrom<T>] => adapter::free_writer::<T, D>
    }
}

/// Detects every hook of a concrete `(T, D)` pair and returns a [`HookSet`].
///
/// Both arguments must be concrete types. Fallbacks are not detected here,
/// they live in the [registry](crate::registry).
#[macro_export]
macro_rules! probe_hooks {
    ($ty:ty, $doc:ty) => {{
        #[allow(unused_imports)]
        use $crate::probe::detect::*;

        let probe = $crate::probe::Probe::<$ty, $doc>::new();
        $crate::probe::HookSet::<$ty, $doc> {
            default_ctor: (&probe).default_ctor(),
            instance_method: (&probe).instance_method(),
            static_mutator: (&probe).static_mutator(),
            free_function: (&probe).free_function(),
            static_factory: (&probe).static_factory(),
            tagged_fallback: ::core::option::Option::None,
            free_writer: (&probe).free_writer(),
            write_fallback: ::core::option::Option::None,
        }
    }};
}

// -----------------------------------------------------------------------------
// HookSet

/// Every hook known for a `(T, D)` pair, already normalized.
///
/// Built by [`probe_hooks!`](crate::probe_hooks) and completed with fallbacks
/// by the [registry](crate::registry).
pub struct HookSet<T, D> {
    pub default_ctor: Option<DefaultFn<T>>,
    pub instance_method: Option<PopulateFn<T, D>>,
    pub static_mutator: Option<PopulateFn<T, D>>,
    pub free_function: Option<PopulateFn<T, D>>,
    pub static_factory: Option<ConstructFn<T, D>>,
    pub tagged_fallback: Option<TaggedFn<T, D>>,
    pub free_writer: Option<WriteFn<T, D>>,
    pub write_fallback: Option<WriteFn<T, D>>,
}

impl<T, D> HookSet<T, D> {
    /// A set with no hooks at all.
    pub const fn empty() -> Self {
        Self {
            default_ctor: None,
            instance_method: None,
            static_mutator: None,
            free_function: None,
            static_factory: None,
            tagged_fallback: None,
            free_writer: None,
            write_fallback: None,
        }
    }

    /// The detected hooks as flags.
    pub fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::empty();
        caps.set(Capabilities::DEFAULT, self.default_ctor.is_some());
        caps.set(Capabilities::INSTANCE_METHOD, self.instance_method.is_some());
        caps.set(Capabilities::STATIC_MUTATOR, self.static_mutator.is_some());
        caps.set(Capabilities::FREE_FUNCTION, self.free_function.is_some());
        caps.set(Capabilities::STATIC_FACTORY, self.static_factory.is_some());
        caps.set(Capabilities::TAGGED_FALLBACK, self.tagged_fallback.is_some());
        caps.set(Capabilities::WRITE_FREE_FUNCTION, self.free_writer.is_some());
        caps.set(Capabilities::WRITE_FALLBACK, self.write_fallback.is_some());
        caps
    }

    #[inline]
    pub fn constructibility(&self) -> Constructibility {
        if self.default_ctor.is_some() {
            Constructibility::Default
        } else {
            Constructibility::NonDefault
        }
    }

    /// Replaces the probed hooks with those of `probed`, keeping fallbacks.
    pub fn merge_probed(&mut self, probed: Self) {
        let Self {
            tagged_fallback,
            write_fallback,
            ..
        } = *self;
        *self = Self {
            tagged_fallback,
            write_fallback,
            ..probed
        };
    }

    /// The populate adapter for a mutating `kind`, if that hook exists.
    pub fn populate(&self, kind: HookKind) -> Option<Populate<T, D>> {
        let func = match kind {
            HookKind::InstanceMethod => self.instance_method,
            HookKind::StaticMutator => self.static_mutator,
            HookKind::NamespaceFreeFunction => self.free_function,
            HookKind::StaticFactory | HookKind::TaggedFallbackFunction => None,
        };
        func.map(|func| Populate::new(kind, func))
    }

    /// The construct adapter for a value-returning `kind`, if that hook exists.
    pub fn construct(&self, kind: HookKind) -> Option<Construct<T, D>> {
        match kind {
            HookKind::StaticFactory => self.static_factory.map(Construct::factory),
            HookKind::TaggedFallbackFunction => self.tagged_fallback.map(Construct::tagged),
            _ => None,
        }
    }

    /// The write adapter for `kind`, if that hook exists.
    pub fn write(&self, kind: HookKind) -> Option<Write<T, D>> {
        let func = match kind {
            HookKind::NamespaceFreeFunction => self.free_writer,
            HookKind::TaggedFallbackFunction => self.write_fallback,
            _ => None,
        };
        func.map(|func| Write::new(kind, func))
    }
}

impl<T, D> Default for HookSet<T, D> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, D> Clone for HookSet<T, D> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, D> Copy for HookSet<T, D> {}

impl<T, D> fmt::Debug for HookSet<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HookSet").field(&self.capabilities()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
