use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::api::pagination::PageParams;
use crate::database::manager::DatabaseError;
use crate::database::models::HydroponicSystem;
use crate::database::query::{bind_param_query, bind_param_query_as};
use crate::filter::{Filter, SqlParam};

/// All reads and writes are scoped to the owning user. A system another
/// user owns is indistinguishable from one that does not exist: scoped
/// queries simply return no row.
pub struct SystemRepository {
    pool: PgPool,
}

impl SystemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_owned(
        &self,
        owner: Uuid,
        filter: &Filter,
        page: &PageParams,
    ) -> Result<Vec<HydroponicSystem>, DatabaseError> {
        let sql = format!(
            "SELECT * FROM systems WHERE owner_id = $1{} {} LIMIT {} OFFSET {}",
            filter.and_where_sql(),
            filter.order_sql(),
            page.limit(),
            page.offset(),
        );
        let mut q = sqlx::query_as::<_, HydroponicSystem>(&sql).bind(owner);
        for p in filter.params() {
            q = bind_param_query_as(q, p);
        }
        let rows = q.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn count_owned(&self, owner: Uuid, filter: &Filter) -> Result<i64, DatabaseError> {
        let sql = format!(
            "SELECT COUNT(*) AS count FROM systems WHERE owner_id = $1{}",
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
    ) -> Result<Option<HydroponicSystem>, DatabaseError> {
        let system = sqlx::query_as::<_, HydroponicSystem>(
            "SELECT * FROM systems WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        Ok(system)
    }

    pub async fn insert(
        &self,
        owner: Uuid,
        name: &str,
        label: Option<&str>,
        description: Option<&str>,
    ) -> Result<HydroponicSystem, DatabaseError> {
        let system = sqlx::query_as::<_, HydroponicSystem>(
            "INSERT INTO systems (id, owner_id, name, label, description) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(name)
        .bind(label)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(system)
    }

    /// Full update: every writable field is assigned, omitted optionals
    /// become NULL, updated_at refreshes.
    pub async fn update_owned(
        &self,
        owner: Uuid,
        id: Uuid,
        name: &str,
        label: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<HydroponicSystem>, DatabaseError> {
        let system = sqlx::query_as::<_, HydroponicSystem>(
            "UPDATE systems SET name = $1, label = $2, description = $3, updated_at = now() \
             WHERE id = $4 AND owner_id = $5 RETURNING *",
        )
        .bind(name)
        .bind(label)
        .bind(description)
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        Ok(system)
    }

    /// Partial update: only supplied fields are assigned. `Some(None)`
    /// clears an optional field, `None` leaves it untouched. updated_at
    /// refreshes either way.
    pub async fn patch_owned(
        &self,
        owner: Uuid,
        id: Uuid,
        name: Option<&str>,
        label: Option<Option<&str>>,
        description: Option<Option<&str>>,
    ) -> Result<Option<HydroponicSystem>, DatabaseError> {
        let mut sets = vec!["updated_at = now()".to_string()];
        let mut params: Vec<SqlParam> = vec![];

        if let Some(name) = name {
            params.push(SqlParam::Text(name.to_string()));
            sets.push(format!("name = ${}", params.len()));
        }
        if let Some(label) = label {
            match label {
                Some(value) => {
                    params.push(SqlParam::Text(value.to_string()));
                    sets.push(format!("label = ${}", params.len()));
                }
                None => sets.push("label = NULL".to_string()),
            }
        }
        if let Some(description) = description {
            match description {
                Some(value) => {
                    params.push(SqlParam::Text(value.to_string()));
                    sets.push(format!("description = ${}", params.len()));
                }
                None => sets.push("description = NULL".to_string()),
            }
        }

        let sql = format!(
            "UPDATE systems SET {} WHERE id = ${} AND owner_id = ${} RETURNING *",
            sets.join(", "),
            params.len() + 1,
            params.len() + 2,
        );
        let mut q = sqlx::query_as::<_, HydroponicSystem>(&sql);
        for p in &params {
            q = bind_param_query_as(q, p);
        }
        let system = q.bind(id).bind(owner).fetch_optional(&self.pool).await?;
        Ok(system)
    }

    /// Cascades to the system's measurements via the FK. Returns false when
    /// no owned row matched.
    pub async fn delete_owned(&self, owner: Uuid, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM systems WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
