use sqlx::{self, postgres::PgArguments, FromRow};

use crate::filter::SqlParam;

/// Bind a typed filter parameter onto a plain query.
pub fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    p: &'q SqlParam,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match p {
        SqlParam::Text(s) => q.bind(s),
        SqlParam::Timestamp(t) => q.bind(*t),
        SqlParam::Decimal(d) => q.bind(*d),
        SqlParam::Uuid(u) => q.bind(*u),
    }
}

/// Bind a typed filter parameter onto a query_as.
pub fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    p: &'q SqlParam,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match p {
        SqlParam::Text(s) => q.bind(s),
        SqlParam::Timestamp(t) => q.bind(*t),
        SqlParam::Decimal(d) => q.bind(*d),
        SqlParam::Uuid(u) => q.bind(*u),
    }
}
