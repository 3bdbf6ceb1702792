//! Councillor directory repository.

use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use super::Pagination;
use crate::model::{Councillor, NewCouncillor};
use crate::{PgError, PgResult, schema};

/// Repository for the imported councillor directory.
///
/// The directory is refreshed by bulk imports; `(council, ward, name)` is the
/// natural key, so re-imports update party and contact details in place.
#[derive(Debug, Default, Clone, Copy)]
pub struct CouncillorRepository;

impl CouncillorRepository {
    /// Creates a new councillor repository instance.
    pub fn new() -> Self {
        Self
    }

    /// Upserts a batch of councillor records.
    ///
    /// Conflicts on the directory's natural key update the mutable columns
    /// (party, contact email) instead of failing, so repeated imports of the
    /// same directory converge.
    pub async fn upsert_councillors(
        conn: &mut AsyncPgConnection,
        records: Vec<NewCouncillor>,
    ) -> PgResult<Vec<Councillor>> {
        use schema::councillors::dsl::*;

        if records.is_empty() {
            return Ok(Vec::new());
        }

        let upserted = diesel::insert_into(councillors)
            .values(&records)
            .on_conflict((council_name, ward_name, display_name))
            .do_update()
            .set((
                party.eq(excluded(party)),
                contact_email.eq(excluded(contact_email)),
            ))
            .returning(Councillor::as_returning())
            .get_results(conn)
            .await
            .map_err(PgError::from)?;

        Ok(upserted)
    }

    /// Lists directory entries with pagination, ordered by council then ward.
    pub async fn list_councillors(
        conn: &mut AsyncPgConnection,
        pagination: Pagination,
    ) -> PgResult<Vec<Councillor>> {
        use schema::councillors::dsl::*;

        let councillor_list = councillors
            .select(Councillor::as_select())
            .order((council_name.asc(), ward_name.asc(), display_name.asc()))
            .limit(pagination.limit)
            .offset(pagination.offset)
            .load(conn)
            .await
            .map_err(PgError::from)?;

        Ok(councillor_list)
    }

    /// Returns every directory entry for the given councils.
    ///
    /// The detection chain calls this with the council names returned by the
    /// boundary lookup, then matches wards in memory.
    pub async fn find_councillors_for_councils(
        conn: &mut AsyncPgConnection,
        councils: &[String],
    ) -> PgResult<Vec<Councillor>> {
        use schema::councillors::dsl::*;

        if councils.is_empty() {
            return Ok(Vec::new());
        }

        let councillor_list = councillors
            .filter(council_name.eq_any(councils))
            .select(Councillor::as_select())
            .order((ward_name.asc(), display_name.asc()))
            .load(conn)
            .await
            .map_err(PgError::from)?;

        Ok(councillor_list)
    }

    /// Counts all directory entries.
    pub async fn count_councillors(conn: &mut AsyncPgConnection) -> PgResult<i64> {
        use schema::councillors::dsl::*;

        let count = councillors
            .count()
            .get_result(conn)
            .await
            .map_err(PgError::from)?;

        Ok(count)
    }
}
