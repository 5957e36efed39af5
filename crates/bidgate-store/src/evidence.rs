//! Evidence records.

use bidgate_core::entities::EvidenceRecord;
use bidgate_core::evidence::MAX_EVIDENCE_RECORDS;

use crate::mapper::{RawEvidence, fields, types};
use crate::{Query, RecordStore, StoreError};

impl RecordStore {
    /// All evidence owned by a client, up to [`MAX_EVIDENCE_RECORDS`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the list request fails.
    pub async fn list_evidence_for_client(
        &self,
        client_id: &str,
    ) -> Result<Vec<EvidenceRecord>, StoreError> {
        let query = Query::new()
            .equals(fields::CLIENT, client_id)
            .limit(MAX_EVIDENCE_RECORDS);
        self.list_mapped::<RawEvidence, EvidenceRecord>(types::EVIDENCE, &query)
            .await
    }
}
