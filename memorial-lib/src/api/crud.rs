//! Create, Read, Update, Delete operations
//!
//! Every entity implementing [`Resource`] gets the same five operations.
//!
//! # Example
//!
//! ```ignore
//! use memorial_lib::api::ListQuery;
//! use memorial_lib::model::Tribute;
//!
//! let page = client.list::<Tribute>(ListQuery::new(1, 20)).await?;
//! client.delete::<Tribute>(&page.items[0].id).await?;
//! ```

use reqwest::Method;
use serde::Serialize;

use super::page::ListQuery;
use super::page::Page;
use super::request::read_json;
use super::request::unwrap_entity;
use crate::AdminClient;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::Resource;

impl AdminClient {
    /// Fetches one page of a collection.
    pub async fn list<T: Resource>(&self, query: ListQuery) -> Result<Page<T>, Error> {
        let mut url = self.endpoint(T::PATH)?;
        url.query_pairs_mut().extend_pairs(query.to_params());

        let response = self.request(Method::GET, url, None).await?;
        let body = read_json(response).await?;
        let page = Page::from_json(body, T::COLLECTION_KEY)?;
        log::debug!(
            "Loaded {} {} (page {} of {})",
            page.items.len(),
            T::COLLECTION_KEY,
            page.pagination.current_page,
            page.pagination.total_pages
        );
        Ok(page)
    }

    /// Fetches a single entity by id.
    pub async fn retrieve<T: Resource>(&self, id: &str) -> Result<T, Error> {
        let url = self.entity_url::<T>(id)?;
        let response = self.request(Method::GET, url, None).await?;
        let body = read_json(response).await?;
        Ok(unwrap_entity(body, T::SINGULAR_KEY)?)
    }

    /// Creates an entity from a draft and returns the stored entity.
    pub async fn create<T: Resource>(&self, draft: &impl Serialize) -> Result<T, Error> {
        let url = self.endpoint(T::PATH)?;
        let body = serde_json::to_string(draft)?;
        let response = self.request(Method::POST, url, Some(body)).await?;
        let body = read_json(response).await?;
        let created: T = unwrap_entity(body, T::SINGULAR_KEY)?;
        log::info!("Created {} {}", T::SINGULAR_KEY, created.id());
        Ok(created)
    }

    /// Replaces the fields of an entity present in `draft` and returns the
    /// stored entity.
    pub async fn update<T: Resource>(&self, id: &str, draft: &impl Serialize) -> Result<T, Error> {
        let url = self.entity_url::<T>(id)?;
        let body = serde_json::to_string(draft)?;
        let response = self.request(Method::PUT, url, Some(body)).await?;
        let body = read_json(response).await?;
        let updated: T = unwrap_entity(body, T::SINGULAR_KEY)?;
        log::info!("Updated {} {}", T::SINGULAR_KEY, id);
        Ok(updated)
    }

    /// Deletes an entity by id.
    pub async fn delete<T: Resource>(&self, id: &str) -> Result<(), Error> {
        let url = self.entity_url::<T>(id)?;
        self.request(Method::DELETE, url, None).await?;
        log::info!("Deleted {} {}", T::SINGULAR_KEY, id);
        Ok(())
    }

    fn entity_url<T: Resource>(&self, id: &str) -> Result<url::Url, Error> {
        let mut url = self.endpoint(T::PATH)?;
        let invalid = ApiError::InvalidUrl(url.to_string());
        url.path_segments_mut().map_err(|_| invalid)?.push(id);
        Ok(url)
    }
}
