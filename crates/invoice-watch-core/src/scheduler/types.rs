use crate::records::Invoice;
use crate::sources::FetchError;

/// Sequence number of a fetch request. Strictly increasing per scheduler, starting at 1.
pub type FetchSeq = u64;

/// The result of one fetch request, tagged with the request's sequence number.
#[derive(Debug)]
pub struct FetchOutcome {
    pub seq: FetchSeq,
    pub result: Result<Option<Vec<Invoice>>, FetchError>,
}
