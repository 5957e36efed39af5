//! Tenders and their questions.

use bidgate_core::entities::{Tender, TenderQuestion};

use crate::mapper::{RawQuestion, RawTender, fields, types};
use crate::{Direction, Query, RecordStore, StoreError};

/// Tenders returned per client listing.
pub const MAX_TENDERS: u32 = 50;

/// Questions returned per tender.
pub const MAX_QUESTIONS: u32 = 500;

impl RecordStore {
    /// A client's tenders, newest first, at most [`MAX_TENDERS`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the list request fails.
    pub async fn list_tenders_for_client(
        &self,
        client_id: &str,
    ) -> Result<Vec<Tender>, StoreError> {
        let query = Query::new()
            .equals(fields::CLIENT, client_id)
            .sort_by(fields::CREATED_DATE, Direction::Descending)
            .limit(MAX_TENDERS);
        self.list_mapped::<RawTender, Tender>(types::TENDER, &query)
            .await
    }

    /// A tender's questions ordered by question number.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the list request fails.
    pub async fn list_questions_for_tender(
        &self,
        tender_id: &str,
    ) -> Result<Vec<TenderQuestion>, StoreError> {
        let query = Query::new()
            .equals(fields::TENDER, tender_id)
            .sort_by(fields::QUESTION_NUMBER, Direction::Ascending)
            .limit(MAX_QUESTIONS);
        self.list_mapped::<RawQuestion, TenderQuestion>(types::TENDER_QUESTION, &query)
            .await
    }
}
