/// Namespace prefix shared by all product cache keys.
pub const PRODUCT_KEY_PREFIX: &str = "product:";

/// Returns the cache key for a product SKU.
///
/// # Examples
///
/// ```
/// use pdp_core::cache::product_key;
///
/// assert_eq!(product_key("sf-comfort-3l-bg"), "product:sf-comfort-3l-bg");
/// ```
pub fn product_key(sku: &str) -> String {
    format!("{PRODUCT_KEY_PREFIX}{sku}")
}
