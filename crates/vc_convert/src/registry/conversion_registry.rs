use std::sync::OnceLock;

use crate::document::Document;
use crate::error::{ConversionError, Direction};
use crate::hook::{TaggedFn, WriteFn};
use crate::probe::HookSet;
use crate::registry::{ConversionMeta, Convertible, TypePairMap};

// -----------------------------------------------------------------------------
// ConversionRegistry

/// The resolved conversion table, keyed by `(T, D)`.
///
/// [Registering] a pair probes its hooks once through [`Convertible::hooks`],
/// merges the fallbacks registered for it and runs the resolver. Every later
/// conversion of that pair calls the stored winner directly.
///
/// Registration needs `&mut self`, conversion only `&self`. A registry that
/// is done registering can therefore be shared between threads freely, which
/// is what the [global](Self::global) instance does.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "json")] {
/// use serde_json::{Value, json};
/// use vc_convert::{ConversionError, ConversionRegistry, Tag};
///
/// // A foreign type: no hook trait can be implemented for it here.
/// fn read_duration(doc: &Value, _: Tag<core::time::Duration>)
///     -> Result<core::time::Duration, ConversionError>
/// {
///     let secs: u64 = vc_convert::Document::extract_as(doc)?;
///     Ok(core::time::Duration::from_secs(secs))
/// }
///
/// let mut registry = ConversionRegistry::new();
/// registry.register_fallback::<core::time::Duration, Value>(read_duration);
///
/// let value: core::time::Duration = registry.from_document(&json!(3)).unwrap();
/// assert_eq!(value.as_secs(), 3);
/// # }
/// ```
///
/// [Registering]: ConversionRegistry::register
pub struct ConversionRegistry {
    table: TypePairMap<ConversionMeta>,
    auto_registered: bool,
}

impl Default for ConversionRegistry {
    /// See [`ConversionRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionRegistry {
    /// Create a empty [`ConversionRegistry`].
    #[inline]
    pub const fn empty() -> Self {
        Self {
            table: TypePairMap::new(),
            auto_registered: false,
        }
    }

    /// Create a registry with the [built-in fallbacks](crate::builtins)
    /// for every bundled document type.
    ///
    /// - `json` feature: primitives for `serde_json::Value`.
    pub fn new() -> Self {
        #[cfg_attr(not(feature = "json"), expect(unused_mut, reason = "no bundled document"))]
        let mut registry = Self::empty();
        #[cfg(feature = "json")]
        crate::builtins::register_primitives::<serde_json::Value>(&mut registry);
        registry
    }

    fn entry<T: 'static, D: Document>(&mut self) -> &mut ConversionMeta {
        self.table.get_or_insert::<T, D>(ConversionMeta::of::<T, D>)
    }

    /// Probes the hooks of `T` for `D` and resolves the pair.
    ///
    /// Fallbacks registered before or after are kept. Probing is
    /// deterministic, so registering the same pair again changes nothing
    /// and returns `false`.
    pub fn register<T: Convertible<D>, D: Document>(&mut self) -> bool {
        let meta = self.entry::<T, D>();
        if meta.is_probed() {
            log::trace!(
                "`{}` with `{}` is already registered",
                meta.type_name(),
                meta.document_name(),
            );
            return false;
        }

        meta.update::<T, D>(|hooks| hooks.merge_probed(T::hooks()));
        meta.mark_probed();

        log::debug!(
            "registered `{}` with `{}`: read by {:?}, write by {:?}",
            meta.type_name(),
            meta.document_name(),
            meta.read_hook(),
            meta.write_hook(),
        );
        true
    }

    /// Registers `hooks` for `(T, D)` as if they had been probed.
    ///
    /// Useful for generic types, which [`probe_hooks!`](crate::probe_hooks)
    /// cannot see through. Fallbacks already present are kept, and the hooks
    /// replace earlier probed ones.
    pub fn register_hooks<T: 'static, D: Document>(&mut self, hooks: HookSet<T, D>) {
        let meta = self.entry::<T, D>();
        if meta.is_probed() {
            log::debug!(
                "replaced the hooks of `{}` with `{}`",
                meta.type_name(),
                meta.document_name(),
            );
        }
        meta.update::<T, D>(|current| current.merge_probed(hooks));
        meta.mark_probed();
    }

    /// Registers the tagged fallback used to read `T` out of `D`.
    ///
    /// A later registration for the same pair replaces the earlier one.
    pub fn register_fallback<T: 'static, D: Document>(&mut self, func: TaggedFn<T, D>) {
        let meta = self.entry::<T, D>();
        meta.update::<T, D>(|hooks| {
            if hooks.tagged_fallback.replace(func).is_some() {
                log::debug!(
                    "replaced the fallback reading `{}` from `{}`",
                    core::any::type_name::<T>(),
                    core::any::type_name::<D>(),
                );
            }
        });
    }

    /// Registers the fallback used to write `T` into `D`.
    ///
    /// A later registration for the same pair replaces the earlier one.
    pub fn register_write_fallback<T: 'static, D: Document>(&mut self, func: WriteFn<T, D>) {
        let meta = self.entry::<T, D>();
        meta.update::<T, D>(|hooks| {
            if hooks.write_fallback.replace(func).is_some() {
                log::debug!(
                    "replaced the fallback writing `{}` into `{}`",
                    core::any::type_name::<T>(),
                    core::any::type_name::<D>(),
                );
            }
        });
    }

    /// Registers every pair declared with [`impl_convertible!`](crate::impl_convertible)
    /// or [`impl_fallback!`](crate::impl_fallback) anywhere in the program.
    ///
    /// Repeated calls are cheap and will not probe twice.
    ///
    /// ## Return Value
    ///
    /// Returns `true` if automatic registration works on the current platform.
    /// Without the `auto_register` feature it does nothing and returns `false`.
    ///
    /// ## Platform Support
    ///
    /// Collection relies on the `inventory` crate, which covers Linux, macOS,
    /// Windows, iOS, Android and Web. Elsewhere this is a no-op.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::{AutoRegistration, inventory};

            // Reduce the cost of duplicate registrations.
            if self.auto_registered {
                return true;
            }

            let mut count = 0_usize;
            for AutoRegistration(register) in inventory::iter::<AutoRegistration> {
                register(self);
                count += 1;
            }
            log::trace!("collected {count} automatic registrations");
            self.auto_registered
        }
        #[cfg(not(feature = "auto_register"))]
        {
            // Never set without the feature.
            self.auto_registered
        }
    }

    /// Marks automatic registration as available, see [`auto_register`](Self::auto_register).
    #[doc(hidden)]
    #[inline]
    pub fn __mark_auto_registered(&mut self) {
        self.auto_registered = true;
    }

    /// Returns `true` if `(T, D)` has an entry, whether or not it can convert.
    #[inline]
    pub fn contains<T: 'static, D: Document>(&self) -> bool {
        self.table.contains::<T, D>()
    }

    /// Returns the entry of `(T, D)`.
    #[inline]
    pub fn get<T: 'static, D: Document>(&self) -> Option<&ConversionMeta> {
        self.table.get::<T, D>()
    }

    /// Returns an iterator over every entry, in arbitrary order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ConversionMeta> {
        self.table.values()
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Reads a new `T` out of `doc` with the resolved hook.
    ///
    /// Fails with [`ConversionError::NoConversionDefined`] when the pair is
    /// unknown or no hook applies. Errors raised by the hook are returned
    /// unchanged.
    ///
    /// Conversions nested inside the hook, such as [`Document::field`],
    /// resolve against this registry too.
    pub fn from_document<T: 'static, D: Document>(&self, doc: &D) -> Result<T, ConversionError> {
        let plan = self
            .table
            .get::<T, D>()
            .and_then(ConversionMeta::conversion::<T, D>)
            .and_then(|conversion| conversion.read.as_ref())
            .ok_or_else(|| ConversionError::no_conversion::<T, D>(Direction::FromDocument))?;
        self.enter(|| plan.read(doc))
    }

    /// Reads `doc` into an existing `target`.
    ///
    /// A mutating hook runs on `target` in place. A value-returning hook
    /// replaces it, and leaves it untouched on failure.
    pub fn from_document_into<T: 'static, D: Document>(
        &self,
        doc: &D,
        target: &mut T,
    ) -> Result<(), ConversionError> {
        let plan = self
            .table
            .get::<T, D>()
            .and_then(ConversionMeta::conversion::<T, D>)
            .and_then(|conversion| conversion.read.as_ref())
            .ok_or_else(|| ConversionError::no_conversion::<T, D>(Direction::FromDocument))?;
        self.enter(|| plan.read_into(doc, target))
    }

    /// Writes `value` into `doc` with the resolved write hook.
    ///
    /// Nested writes such as [`Document::insert`] use this registry too.
    pub fn to_document<T: 'static, D: Document>(
        &self,
        doc: &mut D,
        value: &T,
    ) -> Result<(), ConversionError> {
        let plan = self
            .table
            .get::<T, D>()
            .and_then(ConversionMeta::conversion::<T, D>)
            .and_then(|conversion| conversion.write.as_ref())
            .ok_or_else(|| ConversionError::no_conversion::<T, D>(Direction::ToDocument))?;
        self.enter(|| plan.write(doc, value))
    }
}

impl core::fmt::Debug for ConversionRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.table.values()).finish()
    }
}

// -----------------------------------------------------------------------------
// Global registry

static GLOBAL: OnceLock<ConversionRegistry> = OnceLock::new();

impl ConversionRegistry {
    /// The process-wide registry used by the free [entry points](crate::from_document).
    ///
    /// Built on first use from [`new`](Self::new) followed by
    /// [`auto_register`](Self::auto_register), unless a registry was
    /// [installed](Self::install) before.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| {
            let mut registry = Self::new();
            registry.auto_register();
            log::debug!("global conversion registry ready with {} entries", registry.len());
            registry
        })
    }

    /// Installs `registry` as the [global](Self::global) one.
    ///
    /// Must happen before the first use of the global registry, otherwise
    /// `registry` is handed back.
    pub fn install(registry: Self) -> Result<(), Self> {
        GLOBAL.set(registry)
    }
}

// -----------------------------------------------------------------------------
// Tests
