//! Sample products for seeding.
//!
//! Pure data with no side effects, shared by the seeder and by tests.

use rust_decimal::Decimal;

use super::types::NewProduct;

/// Returns the fixed batch of sample products inserted by the seeder.
///
/// # Example
///
/// ```
/// use pdp_core::product::sample_products;
///
/// let products = sample_products();
/// assert_eq!(products.len(), 4);
/// assert_eq!(products[0].sku, "sf-comfort-3l-bg");
/// ```
pub fn sample_products() -> Vec<NewProduct> {
    vec![
        NewProduct::new(
            "Sofá 3 Lugares Comfort",
            "MóveisTop",
            "sf-comfort-3l-bg",
            Decimal::new(129999, 2),
            "https://images.unsplash.com/photo-1586023492125-27b2c045efd7",
        )
        .with_description("Sofá confortável de 3 lugares em tecido bege, ideal para sala de estar."),
        NewProduct::new(
            "Mesa de Jantar Elegance",
            "MadeiraFina",
            "mj-elegance-6p-md",
            Decimal::new(89950, 2),
            "https://images.unsplash.com/photo-1549497538-303791108f95",
        )
        .with_description("Mesa de jantar em madeira maciça para 6 pessoas, acabamento natural."),
        NewProduct::new(
            "Cadeira Office Pro",
            "ErgoCorp",
            "cd-office-pro-pt",
            Decimal::new(45000, 2),
            "https://images.unsplash.com/photo-1541558869434-2840d308329a",
        )
        .with_description(
            "Cadeira ergonômica para escritório com apoio lombar e regulagem de altura.",
        ),
        NewProduct::new(
            "Estante Moderna Style",
            "DesignHome",
            "et-moderna-5p-br",
            Decimal::new(32075, 2),
            "https://images.unsplash.com/photo-1586023492125-27b2c045efd7",
        )
        .with_description(
            "Estante moderna de 5 prateleiras em MDF branco, ideal para livros e decoração.",
        ),
    ]
}
