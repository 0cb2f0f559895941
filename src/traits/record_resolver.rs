//! DNS record lookup abstract trait.

use async_trait::async_trait;

use crate::error::TriageResult;
use crate::types::{RecordSet, RecordType};

/// DNS record lookup collaborator.
///
/// Implementations:
/// - `DohResolver` (DNS-over-HTTPS JSON API)
/// - `MockRecordResolver` (tests)
#[async_trait]
pub trait RecordResolver: Send + Sync {
    /// Look up all records of one type for a name.
    ///
    /// A successful result with zero answers means "no records of this
    /// type"; transport and decode failures are returned as errors.
    ///
    /// # Arguments
    /// * `name` - Fully qualified name to query
    /// * `record_type` - Record type to query
    async fn resolve(&self, name: &str, record_type: RecordType) -> TriageResult<RecordSet>;
}
