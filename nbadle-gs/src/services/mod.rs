//! Game services: stats lookup, daily selection and guess evaluation

pub mod attribute_fetcher;
pub mod daily_selector;
pub mod guess_evaluator;
pub mod stats_client;

pub use attribute_fetcher::{AttributeFetcher, FetchOutcome, RetryPolicy};
pub use daily_selector::{DailySelector, SelectionError};
pub use guess_evaluator::GuessEvaluator;
pub use stats_client::{AttributeProvider, AttributeRow, ProviderError, StatsApiClient};
