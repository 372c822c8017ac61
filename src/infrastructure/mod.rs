pub mod memory;
pub mod mock;
pub mod tycoon;

pub use memory::InMemoryCacheStore;
pub use mock::MockDataSource;
pub use tycoon::TycoonClient;
