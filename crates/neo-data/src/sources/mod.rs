pub mod http_source;

use async_trait::async_trait;
use neo_core::{NeosResponse, QueryParams};

use crate::FetchError;

pub use http_source::HttpNeoSource;

/// Anything that can answer a NEO date-range query
#[async_trait]
pub trait NeoSource: Send + Sync {
    /// Fetch the objects approaching Earth in the given date range
    async fn fetch_neos(&self, params: &QueryParams) -> Result<NeosResponse, FetchError>;

    /// Get the source name/URL
    fn source_name(&self) -> &str;
}
