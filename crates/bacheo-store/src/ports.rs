use async_trait::async_trait;
use bacheo_core::error::Result;
use bacheo_core::models::{BacheId, BacheRecord, ListFilter};

/// Port for bache record persistence
#[async_trait]
pub trait BacheStore: Send + Sync {
    /// Store a new record
    async fn insert(&self, record: &BacheRecord) -> Result<()>;

    /// Retrieve a record by ID
    async fn get(&self, id: BacheId) -> Result<Option<BacheRecord>>;

    /// Replace a stored record; fails with `BacheNotFound` if it is missing
    async fn update(&self, record: &BacheRecord) -> Result<()>;

    /// Delete a record, returning whether it existed
    async fn delete(&self, id: BacheId) -> Result<bool>;

    /// List records matching the filter, ordered by `noBache` ascending
    async fn list(&self, filter: &ListFilter) -> Result<Vec<BacheRecord>>;

    /// Highest `noBache` among records whose street key equals `street_key`
    async fn max_no_bache(&self, street_key: &str) -> Result<Option<u32>>;
}
