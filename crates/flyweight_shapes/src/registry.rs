use crate::kind::ShapeKind;
use crate::shape::{Line, Oval, Shape};
use log::{debug, trace};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Builds a fresh shape for one [`ShapeKind`]. Called at most once per kind per registry.
pub type ShapeConstructor = fn() -> Arc<dyn Shape>;

fn oval_filled() -> Arc<dyn Shape> {
    Arc::new(Oval::new(true))
}

fn oval_unfilled() -> Arc<dyn Shape> {
    Arc::new(Oval::new(false))
}

fn line() -> Arc<dyn Shape> {
    Arc::new(Line::new())
}

/// Construction table, indexed by [`ShapeKind::index`]
const CONSTRUCTORS: [ShapeConstructor; ShapeKind::COUNT] = [oval_filled, oval_unfilled, line];

/// Factory that lazily builds and memoizes one shape per kind. Once a shape is built it lives as
/// long as the registry and every later request for the same kind returns that same instance.
///
/// The registry is a plain value: whoever composes the application owns it and hands it to the
/// code that draws.
pub struct ShapeRegistry {
    constructors: [ShapeConstructor; ShapeKind::COUNT],
    shapes: HashMap<ShapeKind, Arc<dyn Shape>>,
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self {
            constructors: CONSTRUCTORS,
            shapes: HashMap::with_capacity(ShapeKind::COUNT),
        }
    }
}

impl ShapeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the constructor for the given kind. Only affects kinds that have not been built
    /// yet; a cached shape is never recreated.
    #[must_use]
    pub fn with_constructor(mut self, kind: ShapeKind, constructor: ShapeConstructor) -> Self {
        self.constructors[kind.index()] = constructor;
        self
    }

    /// Returns the shared shape for `kind`, building it on first request
    pub fn get_shape(&mut self, kind: ShapeKind) -> Arc<dyn Shape> {
        let constructor = self.constructors[kind.index()];

        let shape = self.shapes.entry(kind).or_insert_with(|| {
            debug!("registry: building {kind} shape");
            constructor()
        });

        trace!("registry: handing out {kind} shape");
        Arc::clone(shape)
    }

    /// Returns true when a shape for `kind` has already been built
    pub fn contains(&self, kind: ShapeKind) -> bool {
        self.shapes.contains_key(&kind)
    }

    /// Number of shapes built so far
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Kinds that have been built, in [`ShapeKind::ALL`] order
    pub fn cached_kinds(&self) -> Vec<ShapeKind> {
        ShapeKind::ALL
            .into_iter()
            .filter(|kind| self.contains(*kind))
            .collect()
    }
}

/// A [`ShapeRegistry`] that can be shared between threads. Lookup and construction happen under
/// one lock, so concurrent first requests for a kind still build a single instance.
#[derive(Default)]
pub struct SharedShapeRegistry {
    inner: Mutex<ShapeRegistry>,
}

impl SharedShapeRegistry {
    #[must_use]
    pub fn new(registry: ShapeRegistry) -> Self {
        Self {
            inner: Mutex::new(registry),
        }
    }

    pub fn get_shape(&self, kind: ShapeKind) -> Arc<dyn Shape> {
        self.inner.lock().get_shape(kind)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn into_inner(self) -> ShapeRegistry {
        self.inner.into_inner()
    }
}
