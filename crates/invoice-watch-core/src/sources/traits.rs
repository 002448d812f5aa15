use std::future::Future;

use crate::records::Invoice;
use crate::sources::errors::FetchError;

/// Something that can be asked, on demand, for the full current set of invoices.
///
/// `Ok(None)` is an absent payload; callers treat it as an empty collection.
/// Implementations must not retry internally: the scheduler's next tick is the retry.
pub trait RecordSource: Send + Sync + 'static {
    fn list_invoices(
        &self,
    ) -> impl Future<Output = Result<Option<Vec<Invoice>>, FetchError>> + Send;
}
