use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::api::pagination::PageParams;
use crate::database::manager::DatabaseError;
use crate::database::models::Measurement;
use crate::database::query::{bind_param_query, bind_param_query_as};
use crate::filter::{Filter, SqlParam};

/// Ownership is transitive through the parent system, so every scoped
/// statement narrows to `system_id IN (systems the caller owns)`. As with
/// systems, foreign rows read as nonexistent.
const OWNED_SCOPE: &str = "system_id IN (SELECT id FROM systems WHERE owner_id = $1)";

pub struct MeasurementRepository {
    pool: PgPool,
}

impl MeasurementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_owned(
        &self,
        owner: Uuid,
        filter: &Filter,
        page: &PageParams,
    ) -> Result<Vec<Measurement>, DatabaseError> {
        let sql = format!(
            "SELECT * FROM measurements WHERE {}{} {} LIMIT {} OFFSET {}",
            OWNED_SCOPE,
            filter.and_where_sql(),
            filter.order_sql(),
            page.limit(),
            page.offset(),
        );
        let mut q = sqlx::query_as::<_, Measurement>(&sql).bind(owner);
        for p in filter.params() {
            q = bind_param_query_as(q, p);
        }
        let rows = q.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn count_owned(&self, owner: Uuid, filter: &Filter) -> Result<i64, DatabaseError> {
        let sql = format!(
            "SELECT COUNT(*) AS count FROM measurements WHERE {}{}",
            OWNED_SCOPE,
            filter.and_where_sql(),
        );
        let mut q = sqlx::query(&sql).bind(owner);
        for p in filter.params() {
            q = bind_param_query(q, p);
        }
        let row = q.fetch_one(&self.pool).await?;
        let count: i64 = row.try_get("count")?;
        Ok(count)
    }

    pub async fn get_owned(
        &self,
        owner: Uuid,
        id: Uuid,
    ) -> Result<Option<Measurement>, DatabaseError> {
        let sql = format!("SELECT * FROM measurements WHERE {} AND id = $2", OWNED_SCOPE);
        let measurement = sqlx::query_as::<_, Measurement>(&sql)
            .bind(owner)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(measurement)
    }

    /// Ownership of the target system is the caller's responsibility; the
    /// create handler checks it first so a foreign system yields 403, not 404.
    pub async fn insert(
        &self,
        system_id: Uuid,
        ph: Decimal,
        water_temperature: Decimal,
        tds: Decimal,
    ) -> Result<Measurement, DatabaseError> {
        let measurement = sqlx::query_as::<_, Measurement>(
            "INSERT INTO measurements (id, system_id, ph, water_temperature, tds) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(system_id)
        .bind(ph)
        .bind(water_temperature)
        .bind(tds)
        .fetch_one(&self.pool)
        .await?;
        Ok(measurement)
    }

    pub async fn update_owned(
        &self,
        owner: Uuid,
        id: Uuid,
        ph: Decimal,
        water_temperature: Decimal,
        tds: Decimal,
    ) -> Result<Option<Measurement>, DatabaseError> {
        let sql = format!(
            "UPDATE measurements SET ph = $2, water_temperature = $3, tds = $4 \
             WHERE {} AND id = $5 RETURNING *",
            OWNED_SCOPE,
        );
        let measurement = sqlx::query_as::<_, Measurement>(&sql)
            .bind(owner)
            .bind(ph)
            .bind(water_temperature)
            .bind(tds)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(measurement)
    }

    pub async fn patch_owned(
        &self,
        owner: Uuid,
        id: Uuid,
        ph: Option<Decimal>,
        water_temperature: Option<Decimal>,
        tds: Option<Decimal>,
    ) -> Result<Option<Measurement>, DatabaseError> {
        let mut sets: Vec<String> = vec![];
        let mut params: Vec<SqlParam> = vec![SqlParam::Uuid(owner)];

        if let Some(value) = ph {
            params.push(SqlParam::Decimal(value));
            sets.push(format!("ph = ${}", params.len()));
        }
        if let Some(value) = water_temperature {
            params.push(SqlParam::Decimal(value));
            sets.push(format!("water_temperature = ${}", params.len()));
        }
        if let Some(value) = tds {
            params.push(SqlParam::Decimal(value));
            sets.push(format!("tds = ${}", params.len()));
        }

        if sets.is_empty() {
            // Nothing to assign; a no-op patch still answers with the record
            return self.get_owned(owner, id).await;
        }

        let sql = format!(
            "UPDATE measurements SET {} WHERE {} AND id = ${} RETURNING *",
            sets.join(", "),
            OWNED_SCOPE,
            params.len() + 1,
        );
        let mut q = sqlx::query_as::<_, Measurement>(&sql);
        for p in &params {
            q = bind_param_query_as(q, p);
        }
        let measurement = q.bind(id).fetch_optional(&self.pool).await?;
        Ok(measurement)
    }

    pub async fn delete_owned(&self, owner: Uuid, id: Uuid) -> Result<bool, DatabaseError> {
        let sql = format!("DELETE FROM measurements WHERE {} AND id = $2", OWNED_SCOPE);
        let result = sqlx::query(&sql)
            .bind(owner)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Newest-first slice embedded in the system detail view.
    pub async fn recent_for_system(
        &self,
        system_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Measurement>, DatabaseError> {
        let sql = format!(
            "SELECT * FROM measurements WHERE system_id = $1 ORDER BY created_at DESC LIMIT {}",
            limit,
        );
        let rows = sqlx::query_as::<_, Measurement>(&sql)
            .bind(system_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
