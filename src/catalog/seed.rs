//! Demo catalog data
//!
//! The four beverages inserted into an empty catalog by the seed operation.

use crate::schema::{Beverage, SchemaResult};

/// Number of beverages in the demo catalog
pub const SAMPLE_COUNT: usize = 4;

/// Build the demo catalog, validating every entry.
pub fn sample_beverages() -> SchemaResult<Vec<Beverage>> {
    let beverages = vec![
        Beverage::builder("Citrus Zing", "Lemon + Lime", 3.99, 500)
            .description("A bright, zesty squash made from sun-ripened lemons and limes.")
            .image_url("https://images.unsplash.com/photo-1524594227084-6df73d85d2f9?w=800&q=80")
            .tags(["citrus", "refreshing", "vegan"])
            .build()?,
        Beverage::builder("Mango Bliss", "Alphonso Mango", 4.49, 500)
            .description("Thick, luscious mango squash with no added preservatives.")
            .image_url("https://images.unsplash.com/photo-1547514701-42782101795e?w=800&q=80")
            .tags(["tropical", "best-seller"])
            .build()?,
        Beverage::builder("Guava Glow", "Pink Guava", 4.29, 500)
            .description("Delicately sweet guava squash perfect for summer coolers.")
            .image_url("https://images.unsplash.com/photo-1604908554027-6e2ce8f94bd7?w=800&q=80")
            .tags(["tropical", "vitamin-c"])
            .build()?,
        Beverage::builder("Orange Orchard", "Valencia Orange", 3.79, 500)
            .description("Classic orange squash with a clean, fresh finish.")
            .image_url("https://images.unsplash.com/photo-1557800636-894a64c1696f?w=800&q=80")
            .tags(["citrus", "family"])
            .build()?,
    ];

    debug_assert_eq!(beverages.len(), SAMPLE_COUNT);
    Ok(beverages)
}
