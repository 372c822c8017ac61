pub mod fetcher;
pub mod scanner;
pub mod throttle;

pub use throttle::Throttle;
