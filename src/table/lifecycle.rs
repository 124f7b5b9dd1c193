//! Value Lifecycle Module
//!
//! Constructor/destructor contract the table uses to materialize and release values.

// == Lifecycle ==
/// Creates values on a miss and releases them when the table lets go.
///
/// The implementing type is also the application context: both callbacks get
/// `&mut self`, so anything a value needs to be built or torn down lives here.
pub trait Lifecycle {
    /// Value type held by the table.
    type Value;

    /// Materializes the value for `key`. Called once per miss.
    fn create(&mut self, key: &str) -> Self::Value;

    /// Releases a value the table no longer holds. Called exactly once per
    /// value, on eviction, refresh or teardown.
    fn destroy(&mut self, value: Self::Value);
}

// == Closure Lifecycle ==
/// [`Lifecycle`] built from a context and two closures.
///
/// ```
/// use ctable::table::{CTable, FnLifecycle};
///
/// let lifecycle = FnLifecycle::new(
///     0usize,
///     |key: &str, built: &mut usize| {
///         *built += 1;
///         key.to_uppercase()
///     },
///     |_value: String, _built: &mut usize| {},
/// );
/// let mut table = CTable::new(8, lifecycle);
/// assert_eq!(table.locate("mx"), "MX");
/// assert_eq!(*table.lifecycle().context(), 1);
/// ```
pub struct FnLifecycle<C, F, D> {
    context: C,
    create: F,
    destroy: D,
}

impl<C, F, D> FnLifecycle<C, F, D> {
    pub fn new(context: C, create: F, destroy: D) -> Self {
        Self {
            context,
            create,
            destroy,
        }
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Swaps in a new context and returns the old one.
    pub fn set_context(&mut self, context: C) -> C {
        std::mem::replace(&mut self.context, context)
    }
}

impl<C, V, F, D> Lifecycle for FnLifecycle<C, F, D>
where
    F: FnMut(&str, &mut C) -> V,
    D: FnMut(V, &mut C),
{
    type Value = V;

    fn create(&mut self, key: &str) -> V {
        (self.create)(key, &mut self.context)
    }

    fn destroy(&mut self, value: V) {
        (self.destroy)(value, &mut self.context)
    }
}

impl<C: std::fmt::Debug, F, D> std::fmt::Debug for FnLifecycle<C, F, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnLifecycle")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
