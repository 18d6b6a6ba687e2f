// Service exports
pub mod cache;
pub mod identity;
pub mod store;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use identity::{Claims, IdentityError, TokenVerifier};
pub use store::{RecordStore, StoreError};
