use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use crate::document::Document;
use crate::priority::{Capabilities, HookKind};
use crate::probe::HookSet;
use crate::resolve::{ReadPlan, WritePlan};

// -----------------------------------------------------------------------------
// Conversion

/// Hooks and resolved plans of one `(T, D)` pair.
pub(crate) struct Conversion<T, D> {
    pub hooks: HookSet<T, D>,
    pub read: Option<ReadPlan<T, D>>,
    pub write: Option<WritePlan<T, D>>,
}

impl<T, D> Conversion<T, D> {
    fn resolved(hooks: HookSet<T, D>) -> Self {
        Self {
            read: ReadPlan::resolve(&hooks),
            write: WritePlan::resolve(&hooks),
            hooks,
        }
    }
}

// -----------------------------------------------------------------------------
// ConversionMeta

/// Registry entry for one `(T, D)` pair.
///
/// Holds the type-erased hooks together with what the resolver decided for
/// them. The decision is recomputed whenever the entry changes during
/// registration, and never at conversion time.
pub struct ConversionMeta {
    type_name: &'static str,
    document_name: &'static str,
    probed: bool,
    capabilities: Capabilities,
    read_hook: Option<HookKind>,
    write_hook: Option<HookKind>,
    conversion: Box<dyn Any + Send + Sync>,
}

impl ConversionMeta {
    /// Create a [`ConversionMeta`] without any hook.
    pub(crate) fn of<T: 'static, D: Document>() -> Self {
        Self {
            type_name: core::any::type_name::<T>(),
            document_name: core::any::type_name::<D>(),
            probed: false,
            capabilities: Capabilities::empty(),
            read_hook: None,
            write_hook: None,
            conversion: Box::new(Conversion::<T, D>::resolved(HookSet::empty())),
        }
    }

    /// Returns the target type name.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the document type name.
    #[inline]
    pub const fn document_name(&self) -> &'static str {
        self.document_name
    }

    /// Whether the owner hooks were probed, i.e. the pair was registered
    /// through [`Convertible`](crate::Convertible) and not only through fallbacks.
    #[inline]
    pub const fn is_probed(&self) -> bool {
        self.probed
    }

    /// All hooks known for the pair.
    #[inline]
    pub const fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// The hook used from document to value, if any.
    #[inline]
    pub const fn read_hook(&self) -> Option<HookKind> {
        self.read_hook
    }

    /// The hook used from value to document, if any.
    #[inline]
    pub const fn write_hook(&self) -> Option<HookKind> {
        self.write_hook
    }

    #[inline]
    pub(crate) fn conversion<T: 'static, D: 'static>(&self) -> Option<&Conversion<T, D>> {
        self.conversion.downcast_ref()
    }

    /// Applies `f` to the hooks of the pair and resolves again.
    pub(crate) fn update<T: 'static, D: Document>(&mut self, f: impl FnOnce(&mut HookSet<T, D>)) {
        let mut hooks = match self.conversion::<T, D>() {
            Some(conversion) => conversion.hooks,
            None => HookSet::empty(),
        };
        f(&mut hooks);

        let conversion = Conversion::resolved(hooks);
        self.capabilities = conversion.hooks.capabilities();
        self.read_hook = conversion.read.as_ref().map(ReadPlan::kind);
        self.write_hook = conversion.write.as_ref().map(WritePlan::kind);
        self.conversion = Box::new(conversion);
    }

    #[inline]
    pub(crate) fn mark_probed(&mut self) {
        self.probed = true;
    }
}

impl fmt::Debug for ConversionMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionMeta")
            .field("type_name", &self.type_name)
            .field("document_name", &self.document_name)
            .field("probed", &self.probed)
            .field("capabilities", &self.capabilities)
            .field("read_hook", &self.read_hook)
            .field("write_hook", &self.write_hook)
            .finish_non_exhaustive()
    }
}
