use sqlx::PgPool;

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            UUID PRIMARY KEY,
    email         TEXT NOT NULL,
    password_hash TEXT NOT NULL,
    created_at    TIMESTAMPTZ NOT NULL,
    updated_at    TIMESTAMPTZ NOT NULL
)
"#;

// Login looks identities up by email; the unique index doubles as that lookup path.
const CREATE_USERS_EMAIL_INDEX: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS users_email_key ON users (email)";

const CREATE_PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id         UUID PRIMARY KEY,
    owner_id   UUID NOT NULL REFERENCES users (id),
    name       TEXT NOT NULL,
    kind       TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
)
"#;

const CREATE_PRODUCTS_OWNER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS products_owner_id_idx ON products (owner_id, id)";

/// Create tables and indexes if they do not exist yet
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Initializing PostgreSQL schema...");

    for stmt in [
        CREATE_USERS_TABLE,
        CREATE_USERS_EMAIL_INDEX,
        CREATE_PRODUCTS_TABLE,
        CREATE_PRODUCTS_OWNER_INDEX,
    ] {
        sqlx::query(stmt).execute(pool).await?;
    }

    tracing::info!("PostgreSQL schema ready");
    Ok(())
}
