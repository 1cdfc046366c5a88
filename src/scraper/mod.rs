// Scraper module: HTTP fetching and the bounded page worker pool.

pub mod fetcher;
pub mod pool;
pub mod traits;

pub use fetcher::HttpFetcher;
pub use pool::WorkerPool;
pub use traits::PageFetcher;
