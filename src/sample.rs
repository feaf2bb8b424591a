//! Random picture selection for the root document.
//!
//! The root README shows a rotating subset of each category rather than
//! the whole collection, so every regeneration produces a fresh front
//! page. Selection is a plain shuffle-and-truncate against the thread
//! RNG; there is no seeding knob, and runs are deliberately
//! non-reproducible.

use rand::seq::SliceRandom;

use crate::scan::Categories;

/// Reduce every category to at most `choose` pictures, picked uniformly
/// at random. Categories with `choose` or fewer pictures keep all of
/// them (in random order); no category ever gains or loses its key.
pub fn sample(mut categories: Categories, choose: usize) -> Categories {
    let mut rng = rand::rng();
    for pictures in categories.values_mut() {
        pictures.shuffle(&mut rng);
        pictures.truncate(choose);
    }
    categories
}
