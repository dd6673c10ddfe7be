use chordcheck::*;

/// Drop and rebuild the music store from its scripts, optionally seeding it,
/// and hand back a handle scoped to the fresh database.
pub async fn rebuild(seed: bool) -> Db {
    let config = DbConfig::from_env().expect("DB_HOST/DB_USER/DB_PASSWORD must be set");

    let mut server = Db::new(config.url(None));
    server.connect().await.expect("server connection");
    server
        .exec(&format!("DROP DATABASE IF EXISTS {DATABASE_NAME}"))
        .await
        .expect("drop database");
    server.exec_file(SCHEMA_SCRIPT).await.expect("schema script");
    if seed {
        server.exec_file(SEED_SCRIPT).await.expect("seed script");
    }

    let mut db = Db::new(config.url(Some(DATABASE_NAME)));
    db.connect().await.expect("database connection");
    db
}
