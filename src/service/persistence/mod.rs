use async_trait::async_trait;

use crate::errors::PhonebookResult;
use crate::models::{Person, PersonDetails};

pub mod memory;
pub mod relational;

/// Storage for person records. Ids arrive as raw path segments; each store
/// rejects ids outside its own format with `PhonebookError::InvalidId`.
#[async_trait]
pub trait PersonPersistence: Send + Sync {
    async fn create(&self, details: &PersonDetails) -> PhonebookResult<Person>;
    async fn update(&self, id: &str, details: &PersonDetails) -> PhonebookResult<Option<Person>>;
    async fn delete(&self, id: &str) -> PhonebookResult<u64>;
    async fn get_by_id(&self, id: &str) -> PhonebookResult<Option<Person>>;
    async fn find_by_name(&self, name: &str) -> PhonebookResult<Option<Person>>;
    async fn list(&self) -> PhonebookResult<Vec<Person>>;
    async fn count(&self) -> PhonebookResult<usize>;
}
