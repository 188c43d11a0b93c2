use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxContactRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxProjectRepo {
    pub pool: PgPool,
}
