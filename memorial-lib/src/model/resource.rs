//! The Resource trait

use serde::de::DeserializeOwned;

/// An entity with its own REST collection.
///
/// # Example
///
/// ```
/// use memorial_lib::model::Resource;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Banner {
///     #[serde(rename = "_id")]
///     id: String,
/// }
///
/// impl Resource for Banner {
///     const PATH: &'static str = "banners";
///     const COLLECTION_KEY: &'static str = "banners";
///     const SINGULAR_KEY: &'static str = "banner";
///
///     fn id(&self) -> &str {
///         &self.id
///     }
/// }
/// ```
pub trait Resource: DeserializeOwned + Send + 'static {
    /// Collection path relative to the API root.
    const PATH: &'static str;
    /// Member of a list response holding the items.
    const COLLECTION_KEY: &'static str;
    /// Member wrapping a single entity in detail responses.
    const SINGULAR_KEY: &'static str;

    fn id(&self) -> &str;
}
