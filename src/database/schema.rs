use sqlx::SqlitePool;

/// Applied at startup (and by tests against in-memory databases). All
/// statements are idempotent.
///
/// `biodatas.biodata_id` is the public sequence number. It is deliberately
/// not UNIQUE: assignment is a count+1 read followed by an insert, so two
/// concurrent first-time creations can observe the same count. The duplicate
/// is accepted rather than masked (see DESIGN.md).
const DDL: &[&str] = &[
    r#"
CREATE TABLE IF NOT EXISTS accounts (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  email TEXT NOT NULL UNIQUE,
  name TEXT,
  role TEXT NOT NULL DEFAULT 'member'
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS biodatas (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  biodata_id INTEGER NOT NULL,
  email TEXT NOT NULL UNIQUE,
  name TEXT,
  biodata_type TEXT,
  age INTEGER,
  division TEXT,
  occupation TEXT,
  image_url TEXT,
  status TEXT NOT NULL DEFAULT 'pending',
  mobile TEXT,
  contact_email TEXT
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS favourites (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  viewer_email TEXT NOT NULL,
  biodata_id INTEGER NOT NULL
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS payments (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  email TEXT NOT NULL,
  amount INTEGER NOT NULL,
  currency TEXT NOT NULL DEFAULT 'usd',
  biodata_id INTEGER NOT NULL,
  status TEXT NOT NULL DEFAULT 'pending'
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS success_stories (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  self_biodata_id INTEGER NOT NULL,
  partner_biodata_id INTEGER NOT NULL,
  story TEXT NOT NULL,
  married_at TEXT NOT NULL
)
"#,
];

pub async fn init(pool: &SqlitePool) -> sqlx::Result<()> {
    for stmt in DDL {
        sqlx::query(stmt).execute(pool).await?;
    }
    Ok(())
}
