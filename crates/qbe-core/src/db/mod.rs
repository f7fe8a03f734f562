pub mod error;
pub mod fetch;
pub mod filter;
pub mod memory;
pub mod processor;
pub mod repository;
pub mod session;


pub use error::{FetchError, QueryError};
pub use fetch::{DetachedFetchResolver, DetachedFetchTarget};
pub use filter::{DetachedFetch, Filter, OrderDirection, OrderSpec, PAGE_INDEX, PAGE_SIZE};
pub use memory::{MemorySession, MemoryStore};
pub use processor::ContextProcessor;
pub use repository::QbeRepository;
pub use session::{Query, Session, Tuple};
