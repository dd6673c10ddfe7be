use chordcheck::*;
use log::{error, info};

/// Rebuild the music store from its scripts and run every schema and
/// seed-data check against it.
async fn run() -> VerifyResult<()> {
    let config = DbConfig::from_env()?;

    // Server-scoped handle for the rebuild; the scripts create and enter
    // the database themselves.
    let mut server = Db::new(config.url(None));
    server.connect().await?;

    info!("rebuilding database `{DATABASE_NAME}`");
    server
        .exec(&format!("DROP DATABASE IF EXISTS {DATABASE_NAME}"))
        .await?;
    server.exec_file(SCHEMA_SCRIPT).await?;
    server.exec_file(SEED_SCRIPT).await?;

    // Checks run over a handle scoped to the freshly built database.
    let mut db = Db::new(config.url(Some(DATABASE_NAME)));
    db.connect().await?;

    let validator = SchemaValidator::new(&db, DATABASE_NAME);
    validator.database_exists().await?;

    for table in music_store_tables() {
        info!("checking table `{}`", table.name);
        validator.validate_table(&table).await?;
    }

    info!("checking seeded rows");
    validate_name_list(&db, GENRE_NAMES_SQL, GENRES).await?;
    validate_name_list(&db, ARTIST_NAMES_SQL, ARTISTS).await?;
    validate_name_list(&db, ALBUM_NAMES_SQL, ALBUMS).await?;
    validate_name_list(&db, SONG_NAMES_SQL, SONGS).await?;

    info!("checking relations");
    for relation in SONG_ARTISTS {
        validate_relation(&db, SONG_ARTISTS_SQL, relation).await?;
    }
    for relation in SONG_ALBUMS {
        validate_relation(&db, SONG_ALBUMS_SQL, relation).await?;
    }
    for relation in SONG_GENRES {
        validate_relation(&db, SONG_GENRES_SQL, relation).await?;
    }
    for relation in ARTIST_ALBUMS {
        validate_relation(&db, ARTIST_ALBUMS_SQL, relation).await?;
    }

    info!("all checks passed");
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();
    if let Err(err) = run().await {
        error!("{err}");
        std::process::exit(1);
    }
}
