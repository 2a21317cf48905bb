//! The `Animation` trait every backdrop field implements.
//!
//! The trait is object-safe so a scheduler or host can hold `Box<dyn Animation>`
//! and switch fields at runtime.

use crate::surface::{Size, Surface};
use serde_json::Value;

/// A set of entities that evolves once per frame and paints itself.
///
/// `update` and `render` take the surface's *current* size; implementations
/// must not keep their own copy of it between frames.
pub trait Animation {
    /// Replaces all entities with `count` freshly drawn ones spread over `size`.
    fn init(&mut self, count: usize, size: Size);

    /// Advances every entity by one frame.
    fn update(&mut self, size: Size);

    /// Paints the current state into `surface`.
    fn render(&self, surface: &mut dyn Surface);

    /// Number of live entities.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing the parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;
}

impl<A: Animation + ?Sized> Animation for Box<A> {
    fn init(&mut self, count: usize, size: Size) {
        (**self).init(count, size);
    }

    fn update(&mut self, size: Size) {
        (**self).update(size);
    }

    fn render(&self, surface: &mut dyn Surface) {
        (**self).render(surface);
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn params(&self) -> Value {
        (**self).params()
    }

    fn param_schema(&self) -> Value {
        (**self).param_schema()
    }
}
