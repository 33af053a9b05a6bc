//! # Submission Repository
//!
//! Upsert/read access to the `submissions` table, keyed by
//! (organisation, period code). The trait abstracts over the transport:
//! production wires [`HttpSubmissionRepository`] against the hosted
//! store; tests use the in-memory [`MockSubmissionRepository`].
//!
//! ## Upsert Semantics
//!
//! The store does not enforce uniqueness on the composite key, so
//! at-most-one-row-per-key is maintained by check-then-act: the caller
//! loads the current row and passes its id back into [`upsert`], which
//! updates in place; with no id, a fresh insert is performed. Two
//! concurrent first-time submissions for the same key can both observe
//! "absent" and both insert — accepted for the expected single
//! interactive session per organisation.
//!
//! ## Totals
//!
//! The persisted `dist_total` is write-only bookkeeping for downstream
//! consumers of the table: it is recomputed from the five fields
//! immediately before every write and ignored on every read.
//!
//! [`upsert`]: SubmissionRepository::upsert

use std::sync::Mutex;

use porta_core::{
    DistributionRecord, Organisation, PeriodCode, Submission, SubmissionId, SubmissionStatus,
    UserId,
};
use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::session::Session;
use crate::transport;

const SUBMISSIONS_ENDPOINT: &str = "/rest/v1/submissions";

/// Keyed read/upsert access to submissions.
///
/// Object-safe and `Send + Sync` so implementations can be shared behind
/// an `Arc` and swapped for the in-memory mock in tests.
pub trait SubmissionRepository: Send + Sync {
    /// Fetch the unique row for (organisation, period), or `None`.
    fn load(
        &self,
        session: &Session,
        organisation: &Organisation,
        period: &PeriodCode,
    ) -> Result<Option<Submission>, StoreError>;

    /// Update the row named by `existing` in place, or insert a fresh row
    /// and return its store-assigned id.
    ///
    /// The caller must have just loaded the current row for the key —
    /// passing `None` when a row exists silently creates a duplicate.
    /// Values are not re-validated here; non-negativity is carried by
    /// [`DistributionRecord`] itself.
    #[allow(clippy::too_many_arguments)]
    fn upsert(
        &self,
        session: &Session,
        existing: Option<SubmissionId>,
        actor: UserId,
        organisation: &Organisation,
        period: &PeriodCode,
        record: DistributionRecord,
        status: SubmissionStatus,
    ) -> Result<SubmissionId, StoreError>;

    /// Every submission for one period, ordered by organisation. Feeds
    /// the admin CSV export.
    fn list_for_period(
        &self,
        session: &Session,
        period: &PeriodCode,
    ) -> Result<Vec<Submission>, StoreError>;

    /// Distinct period codes present in storage, sorted ascending. Feeds
    /// the reports view.
    fn list_period_codes(&self, session: &Session) -> Result<Vec<PeriodCode>, StoreError>;
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

/// The `values` column payload. Missing keys read as zero; `dist_total`
/// is accepted on read but discarded — the record recomputes it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct SubmissionValues {
    #[serde(default)]
    dist_nsw: u64,
    #[serde(default)]
    dist_qld: u64,
    #[serde(default)]
    dist_sant: u64,
    #[serde(default)]
    dist_victas: u64,
    #[serde(default)]
    dist_wa: u64,
    #[serde(default)]
    dist_total: u64,
}

impl SubmissionValues {
    fn from_record(record: &DistributionRecord) -> Self {
        Self {
            dist_nsw: record.nsw,
            dist_qld: record.qld,
            dist_sant: record.sant,
            dist_victas: record.victas,
            dist_wa: record.wa,
            dist_total: record.total(),
        }
    }

    fn into_record(self) -> DistributionRecord {
        // dist_total deliberately dropped here.
        DistributionRecord::new(
            self.dist_nsw,
            self.dist_qld,
            self.dist_sant,
            self.dist_victas,
            self.dist_wa,
        )
    }
}

#[derive(Debug, Deserialize)]
struct SubmissionRow {
    id: SubmissionId,
    organisation: Organisation,
    period_code: PeriodCode,
    #[serde(default)]
    values: SubmissionValues,
    status: SubmissionStatus,
    created_by: UserId,
}

impl SubmissionRow {
    fn into_submission(self) -> Submission {
        Submission {
            id: self.id,
            organisation: self.organisation,
            period_code: self.period_code,
            record: self.values.into_record(),
            status: self.status,
            created_by: self.created_by,
        }
    }
}

#[derive(Debug, Serialize)]
struct SubmissionPayload<'a> {
    organisation: &'a Organisation,
    period_code: &'a PeriodCode,
    values: SubmissionValues,
    status: SubmissionStatus,
    created_by: UserId,
}

const ROW_COLUMNS: &str = "id,organisation,period_code,values,status,created_by";

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

/// Repository over the hosted row-level-security store.
#[derive(Debug)]
pub struct HttpSubmissionRepository {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSubmissionRepository {
    /// Create a repository client from the shared configuration.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        Ok(Self {
            client: transport::build_client(config)?,
            base_url: config.base_url.clone(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}{SUBMISSIONS_ENDPOINT}", self.base_url)
    }

    async fn fetch_rows(
        &self,
        session: &Session,
        query: &[(&str, String)],
    ) -> Result<Vec<SubmissionRow>, StoreError> {
        let request = self
            .client
            .get(self.table_url())
            .header(reqwest::header::AUTHORIZATION, session.authorization())
            .query(query);

        let resp = transport::send(request, SUBMISSIONS_ENDPOINT).await?;
        let resp = transport::require_success(resp, SUBMISSIONS_ENDPOINT).await?;

        resp.json()
            .await
            .map_err(|source| StoreError::Deserialization {
                endpoint: SUBMISSIONS_ENDPOINT.to_string(),
                source,
            })
    }
}

impl SubmissionRepository for HttpSubmissionRepository {
    fn load(
        &self,
        session: &Session,
        organisation: &Organisation,
        period: &PeriodCode,
    ) -> Result<Option<Submission>, StoreError> {
        let rt = transport::runtime_handle()?;

        rt.block_on(async {
            let rows = self
                .fetch_rows(
                    session,
                    &[
                        ("organisation", format!("eq.{organisation}")),
                        ("period_code", format!("eq.{period}")),
                        ("select", ROW_COLUMNS.to_string()),
                    ],
                )
                .await?;

            if rows.len() > 1 {
                // The composite key is not store-enforced; a duplicate
                // here means the first-submission race has happened.
                tracing::warn!(
                    %organisation,
                    %period,
                    count = rows.len(),
                    "multiple submissions for one key, using the first"
                );
            }

            Ok(rows.into_iter().next().map(SubmissionRow::into_submission))
        })
    }

    fn upsert(
        &self,
        session: &Session,
        existing: Option<SubmissionId>,
        actor: UserId,
        organisation: &Organisation,
        period: &PeriodCode,
        record: DistributionRecord,
        status: SubmissionStatus,
    ) -> Result<SubmissionId, StoreError> {
        let rt = transport::runtime_handle()?;

        let payload = SubmissionPayload {
            organisation,
            period_code: period,
            values: SubmissionValues::from_record(&record),
            status,
            created_by: actor,
        };

        rt.block_on(async {
            let request = match existing {
                Some(id) => self
                    .client
                    .patch(self.table_url())
                    .query(&[("id", format!("eq.{id}"))]),
                None => self.client.post(self.table_url()),
            };

            let resp = transport::send(
                request
                    .header(reqwest::header::AUTHORIZATION, session.authorization())
                    .header("Prefer", "return=representation")
                    .json(&payload),
                SUBMISSIONS_ENDPOINT,
            )
            .await?;
            let resp = transport::require_success(resp, SUBMISSIONS_ENDPOINT).await?;

            let rows: Vec<SubmissionRow> =
                resp.json()
                    .await
                    .map_err(|source| StoreError::Deserialization {
                        endpoint: SUBMISSIONS_ENDPOINT.to_string(),
                        source,
                    })?;

            match rows.into_iter().next() {
                Some(row) => Ok(row.id),
                // PATCH matched nothing or POST returned no representation.
                None => Err(StoreError::MissingRow {
                    endpoint: SUBMISSIONS_ENDPOINT.to_string(),
                }),
            }
        })
    }

    fn list_for_period(
        &self,
        session: &Session,
        period: &PeriodCode,
    ) -> Result<Vec<Submission>, StoreError> {
        let rt = transport::runtime_handle()?;

        rt.block_on(async {
            let rows = self
                .fetch_rows(
                    session,
                    &[
                        ("period_code", format!("eq.{period}")),
                        ("select", ROW_COLUMNS.to_string()),
                        ("order", "organisation.asc".to_string()),
                    ],
                )
                .await?;
            Ok(rows
                .into_iter()
                .map(SubmissionRow::into_submission)
                .collect())
        })
    }

    fn list_period_codes(&self, session: &Session) -> Result<Vec<PeriodCode>, StoreError> {
        #[derive(Deserialize)]
        struct PeriodRow {
            period_code: PeriodCode,
        }

        let rt = transport::runtime_handle()?;

        rt.block_on(async {
            let request = self
                .client
                .get(self.table_url())
                .header(reqwest::header::AUTHORIZATION, session.authorization())
                .query(&[("select", "period_code"), ("order", "period_code.asc")]);

            let resp = transport::send(request, SUBMISSIONS_ENDPOINT).await?;
            let resp = transport::require_success(resp, SUBMISSIONS_ENDPOINT).await?;

            let rows: Vec<PeriodRow> =
                resp.json()
                    .await
                    .map_err(|source| StoreError::Deserialization {
                        endpoint: SUBMISSIONS_ENDPOINT.to_string(),
                        source,
                    })?;

            let mut codes: Vec<PeriodCode> =
                rows.into_iter().map(|row| row.period_code).collect();
            codes.sort();
            codes.dedup();
            Ok(codes)
        })
    }
}

// ---------------------------------------------------------------------------
// In-memory mock
// ---------------------------------------------------------------------------

/// In-memory repository with the same check-then-act semantics as the
/// store, for tests and offline development.
#[derive(Debug, Default)]
pub struct MockSubmissionRepository {
    rows: Mutex<Vec<Submission>>,
}

impl MockSubmissionRepository {
    /// Create an empty mock repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored. Lets tests pin the
    /// at-most-one-row-per-key contract.
    pub fn row_count(&self) -> usize {
        self.rows.lock().expect("mock lock poisoned").len()
    }

    /// Pre-populate a row.
    pub fn seed(&self, submission: Submission) {
        self.rows
            .lock()
            .expect("mock lock poisoned")
            .push(submission);
    }
}

impl SubmissionRepository for MockSubmissionRepository {
    fn load(
        &self,
        _session: &Session,
        organisation: &Organisation,
        period: &PeriodCode,
    ) -> Result<Option<Submission>, StoreError> {
        let rows = self.rows.lock().expect("mock lock poisoned");
        Ok(rows
            .iter()
            .find(|s| s.organisation == *organisation && s.period_code == *period)
            .cloned())
    }

    fn upsert(
        &self,
        _session: &Session,
        existing: Option<SubmissionId>,
        actor: UserId,
        organisation: &Organisation,
        period: &PeriodCode,
        record: DistributionRecord,
        status: SubmissionStatus,
    ) -> Result<SubmissionId, StoreError> {
        let mut rows = self.rows.lock().expect("mock lock poisoned");
        match existing {
            Some(id) => {
                let row = rows.iter_mut().find(|s| s.id == id).ok_or_else(|| {
                    StoreError::MissingRow {
                        endpoint: "mock:submissions".to_string(),
                    }
                })?;
                // Identifier and key are preserved; only record and
                // status change on update.
                row.record = record;
                row.status = status;
                Ok(id)
            }
            None => {
                let id = SubmissionId::new();
                rows.push(Submission {
                    id,
                    organisation: organisation.clone(),
                    period_code: period.clone(),
                    record,
                    status,
                    created_by: actor,
                });
                Ok(id)
            }
        }
    }

    fn list_for_period(
        &self,
        _session: &Session,
        period: &PeriodCode,
    ) -> Result<Vec<Submission>, StoreError> {
        let rows = self.rows.lock().expect("mock lock poisoned");
        let mut matching: Vec<Submission> = rows
            .iter()
            .filter(|s| s.period_code == *period)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.organisation.cmp(&b.organisation));
        Ok(matching)
    }

    fn list_period_codes(&self, _session: &Session) -> Result<Vec<PeriodCode>, StoreError> {
        let rows = self.rows.lock().expect("mock lock poisoned");
        let mut codes: Vec<PeriodCode> = rows.iter().map(|s| s.period_code.clone()).collect();
        codes.sort();
        codes.dedup();
        Ok(codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(UserId::new(), "test-token")
    }

    fn org(name: &str) -> Organisation {
        Organisation::new(name).unwrap()
    }

    fn period(code: &str) -> PeriodCode {
        PeriodCode::new(code).unwrap()
    }

    // -- wire shapes --

    #[test]
    fn values_roundtrip_recomputes_total() {
        let record = DistributionRecord::new(1, 2, 0, 0, 0);
        let values = SubmissionValues::from_record(&record);
        assert_eq!(values.dist_total, 3);
        assert_eq!(values.into_record().total(), 3);
    }

    #[test]
    fn stored_total_is_ignored_on_read() {
        // A row whose persisted total disagrees with its fields: the
        // fields win, the stored 999 never surfaces.
        let json = serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "organisation": "OrgA",
            "period_code": "2024-05",
            "values": {
                "dist_nsw": 1, "dist_qld": 2, "dist_sant": 0,
                "dist_victas": 0, "dist_wa": 0, "dist_total": 999
            },
            "status": "draft",
            "created_by": uuid::Uuid::new_v4(),
        });
        let row: SubmissionRow = serde_json::from_value(json).unwrap();
        let submission = row.into_submission();
        assert_eq!(submission.record.total(), 3);
    }

    #[test]
    fn missing_value_keys_read_as_zero() {
        let json = serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "organisation": "OrgA",
            "period_code": "2024-05",
            "values": { "dist_nsw": 4 },
            "status": "submitted",
            "created_by": uuid::Uuid::new_v4(),
        });
        let row: SubmissionRow = serde_json::from_value(json).unwrap();
        let submission = row.into_submission();
        assert_eq!(submission.record.nsw, 4);
        assert_eq!(submission.record.qld, 0);
        assert_eq!(submission.record.total(), 4);
    }

    #[test]
    fn payload_serializes_recomputed_total() {
        let record = DistributionRecord::new(5, 0, 0, 0, 7);
        let organisation = org("OrgA");
        let period_code = period("2024-05");
        let payload = SubmissionPayload {
            organisation: &organisation,
            period_code: &period_code,
            values: SubmissionValues::from_record(&record),
            status: SubmissionStatus::Draft,
            created_by: UserId::new(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["values"]["dist_total"], 12);
        assert_eq!(json["status"], "draft");
        assert_eq!(json["organisation"], "OrgA");
    }

    // -- mock repository / state machine --

    #[test]
    fn first_save_creates_zeroed_draft() {
        let repo = MockSubmissionRepository::new();
        let s = session();
        let id = repo
            .upsert(
                &s,
                None,
                s.user_id,
                &org("OrgA"),
                &period("2024-05"),
                DistributionRecord::default(),
                SubmissionStatus::Draft,
            )
            .unwrap();

        let loaded = repo.load(&s, &org("OrgA"), &period("2024-05")).unwrap();
        let loaded = loaded.expect("row should exist after first save");
        assert_eq!(loaded.id, id);
        assert_eq!(loaded.status, SubmissionStatus::Draft);
        assert_eq!(loaded.record.total(), 0);
        assert_eq!(repo.row_count(), 1);
    }

    #[test]
    fn upsert_with_id_updates_in_place() {
        let repo = MockSubmissionRepository::new();
        let s = session();
        let id = repo
            .upsert(
                &s,
                None,
                s.user_id,
                &org("OrgA"),
                &period("2024-05"),
                DistributionRecord::new(1, 0, 0, 0, 0),
                SubmissionStatus::Draft,
            )
            .unwrap();

        let same_id = repo
            .upsert(
                &s,
                Some(id),
                s.user_id,
                &org("OrgA"),
                &period("2024-05"),
                DistributionRecord::new(9, 9, 9, 9, 9),
                SubmissionStatus::Submitted,
            )
            .unwrap();

        assert_eq!(same_id, id, "update must preserve the identifier");
        assert_eq!(repo.row_count(), 1, "update must not create a second row");

        let loaded = repo
            .load(&s, &org("OrgA"), &period("2024-05"))
            .unwrap()
            .unwrap();
        assert_eq!(loaded.record.total(), 45);
        assert_eq!(loaded.status, SubmissionStatus::Submitted);
    }

    #[test]
    fn save_over_submitted_reverts_to_draft() {
        // There is no un-submit guard: any save while editable
        // overwrites the status.
        let repo = MockSubmissionRepository::new();
        let s = session();
        let id = repo
            .upsert(
                &s,
                None,
                s.user_id,
                &org("OrgA"),
                &period("2024-05"),
                DistributionRecord::default(),
                SubmissionStatus::Submitted,
            )
            .unwrap();

        repo.upsert(
            &s,
            Some(id),
            s.user_id,
            &org("OrgA"),
            &period("2024-05"),
            DistributionRecord::default(),
            SubmissionStatus::Draft,
        )
        .unwrap();

        let loaded = repo
            .load(&s, &org("OrgA"), &period("2024-05"))
            .unwrap()
            .unwrap();
        assert_eq!(loaded.status, SubmissionStatus::Draft);
    }

    #[test]
    fn load_is_idempotent() {
        let repo = MockSubmissionRepository::new();
        let s = session();
        repo.upsert(
            &s,
            None,
            s.user_id,
            &org("OrgA"),
            &period("2024-05"),
            DistributionRecord::new(1, 2, 3, 4, 5),
            SubmissionStatus::Draft,
        )
        .unwrap();

        let first = repo.load(&s, &org("OrgA"), &period("2024-05")).unwrap();
        let second = repo.load(&s, &org("OrgA"), &period("2024-05")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn load_absent_is_none() {
        let repo = MockSubmissionRepository::new();
        let s = session();
        let loaded = repo.load(&s, &org("Nobody"), &period("2024-05")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn upsert_with_unknown_id_is_missing_row() {
        let repo = MockSubmissionRepository::new();
        let s = session();
        let err = repo
            .upsert(
                &s,
                Some(SubmissionId::new()),
                s.user_id,
                &org("OrgA"),
                &period("2024-05"),
                DistributionRecord::default(),
                SubmissionStatus::Draft,
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingRow { .. }));
    }

    #[test]
    fn list_for_period_filters_and_sorts() {
        let repo = MockSubmissionRepository::new();
        let s = session();
        for name in ["Zenith", "Acme", "Midway"] {
            repo.upsert(
                &s,
                None,
                s.user_id,
                &org(name),
                &period("2024-05"),
                DistributionRecord::default(),
                SubmissionStatus::Draft,
            )
            .unwrap();
        }
        repo.upsert(
            &s,
            None,
            s.user_id,
            &org("Acme"),
            &period("2024-06"),
            DistributionRecord::default(),
            SubmissionStatus::Draft,
        )
        .unwrap();

        let rows = repo.list_for_period(&s, &period("2024-05")).unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.organisation.as_str()).collect();
        assert_eq!(names, ["Acme", "Midway", "Zenith"]);
    }

    #[test]
    fn list_period_codes_distinct_sorted() {
        let repo = MockSubmissionRepository::new();
        let s = session();
        for (name, code) in [("A", "2024-06"), ("B", "2024-05"), ("C", "2024-06")] {
            repo.upsert(
                &s,
                None,
                s.user_id,
                &org(name),
                &period(code),
                DistributionRecord::default(),
                SubmissionStatus::Draft,
            )
            .unwrap();
        }
        let codes = repo.list_period_codes(&s).unwrap();
        let codes: Vec<&str> = codes.iter().map(PeriodCode::as_str).collect();
        assert_eq!(codes, ["2024-05", "2024-06"]);
    }

    #[test]
    fn mock_is_trait_object_safe() {
        let _boxed: Box<dyn SubmissionRepository> = Box::new(MockSubmissionRepository::new());
    }
}
