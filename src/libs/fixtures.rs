//! The declarative dataset for the music store: every table the schema
//! script must create, and every relation the seed script must satisfy.

use crate::libs::expect::{field, RelationExpectation, TableExpectation};

pub const DATABASE_NAME: &str = "music_store";

/// Schema script, read from the working directory and applied verbatim.
pub const SCHEMA_SCRIPT: &str = "data_definition.sql";
/// Seed script, applied after the schema.
pub const SEED_SCRIPT: &str = "seed_data.sql";

// -------- Table expectations --------

/// All fourteen tables with their full column expectations.
pub fn music_store_tables() -> Vec<TableExpectation> {
    vec![
        TableExpectation::new(
            "artist",
            vec![
                field("id")
                    .of_type("bigint")
                    .primary_key(true)
                    .no_foreign_key()
                    .nullable(false),
                field("name")
                    .of_type("varchar")
                    .primary_key(false)
                    .no_foreign_key()
                    .nullable(false),
            ],
        ),
        TableExpectation::new(
            "album",
            vec![
                field("id")
                    .of_type("bigint")
                    .primary_key(true)
                    .no_foreign_key()
                    .nullable(false),
                field("title")
                    .of_type("varchar")
                    .primary_key(false)
                    .no_foreign_key()
                    .nullable(false),
                field("release_year")
                    .of_type("smallint")
                    .primary_key(false)
                    .no_foreign_key()
                    .nullable(true),
            ],
        ),
        TableExpectation::new(
            "artist_album",
            vec![
                field("id_artist")
                    .of_type("bigint")
                    .primary_key(true)
                    .foreign_key_to("artist")
                    .nullable(false),
                field("id_album")
                    .of_type("bigint")
                    .primary_key(true)
                    .foreign_key_to("album")
                    .nullable(false),
            ],
        ),
        TableExpectation::new(
            "song",
            vec![
                field("id")
                    .of_type("bigint")
                    .primary_key(true)
                    .no_foreign_key()
                    .nullable(false),
                field("title")
                    .of_type("varchar")
                    .primary_key(false)
                    .no_foreign_key()
                    .nullable(false),
                field("release_year")
                    .of_type("smallint")
                    .primary_key(false)
                    .no_foreign_key()
                    .nullable(true),
            ],
        ),
        TableExpectation::new(
            "song_artist",
            vec![
                field("id_song")
                    .of_type("bigint")
                    .primary_key(true)
                    .foreign_key_to("song")
                    .nullable(false),
                field("id_artist")
                    .of_type("bigint")
                    .primary_key(true)
                    .foreign_key_to("artist")
                    .nullable(false),
            ],
        ),
        TableExpectation::new(
            "song_album",
            vec![
                field("id_song")
                    .of_type("bigint")
                    .primary_key(true)
                    .foreign_key_to("song")
                    .nullable(false),
                field("id_album")
                    .of_type("bigint")
                    .primary_key(true)
                    .foreign_key_to("album")
                    .nullable(false),
            ],
        ),
        TableExpectation::new(
            "genre",
            vec![
                field("id")
                    .of_type("bigint")
                    .primary_key(true)
                    .no_foreign_key()
                    .nullable(false),
                field("name")
                    .of_type("varchar")
                    .primary_key(false)
                    .no_foreign_key()
                    .nullable(false),
            ],
        ),
        TableExpectation::new(
            "song_genre",
            vec![
                field("id_song")
                    .of_type("bigint")
                    .primary_key(true)
                    .foreign_key_to("song")
                    .nullable(false),
                field("id_genre")
                    .of_type("bigint")
                    .primary_key(true)
                    .foreign_key_to("genre")
                    .nullable(false),
            ],
        ),
        TableExpectation::new(
            "user",
            vec![
                field("id")
                    .of_type("bigint")
                    .primary_key(true)
                    .no_foreign_key()
                    .nullable(false),
                field("name")
                    .of_type("varchar")
                    .primary_key(false)
                    .no_foreign_key()
                    .nullable(false),
                field("username")
                    .of_type("varchar")
                    .primary_key(false)
                    .no_foreign_key()
                    .nullable(false),
                field("email")
                    .of_type("varchar")
                    .primary_key(false)
                    .no_foreign_key()
                    .nullable(false),
                field("is_premium")
                    .of_type("tinyint")
                    .primary_key(false)
                    .no_foreign_key()
                    .nullable(false),
                field("password")
                    .of_type("varchar")
                    .primary_key(false)
                    .no_foreign_key()
                    .nullable(false),
                field("created_date")
                    .of_type("datetime")
                    .primary_key(false)
                    .no_foreign_key()
                    .nullable(false),
            ],
        ),
        TableExpectation::new(
            "playlist",
            vec![
                field("id")
                    .of_type("bigint")
                    .primary_key(true)
                    .no_foreign_key()
                    .nullable(false),
                field("name")
                    .of_type("varchar")
                    .primary_key(false)
                    .no_foreign_key()
                    .nullable(false),
                field("id_user")
                    .of_type("bigint")
                    .primary_key(false)
                    .foreign_key_to("user")
                    .nullable(false),
                field("created_date")
                    .of_type("datetime")
                    .primary_key(false)
                    .no_foreign_key()
                    .nullable(false),
            ],
        ),
        TableExpectation::new(
            "playlist_song",
            vec![
                field("id_song")
                    .of_type("bigint")
                    .primary_key(true)
                    .foreign_key_to("song")
                    .nullable(false),
                field("id_playlist")
                    .of_type("bigint")
                    .primary_key(true)
                    .foreign_key_to("playlist")
                    .nullable(false),
            ],
        ),
        TableExpectation::new(
            "user_song",
            vec![
                field("id_song")
                    .of_type("bigint")
                    .primary_key(true)
                    .foreign_key_to("song")
                    .nullable(false),
                field("id_user")
                    .of_type("bigint")
                    .primary_key(true)
                    .foreign_key_to("user")
                    .nullable(false),
            ],
        ),
        TableExpectation::new(
            "credit_card",
            vec![
                field("id")
                    .of_type("bigint")
                    .primary_key(true)
                    .no_foreign_key()
                    .nullable(false),
                field("number")
                    .of_type("char")
                    .primary_key(false)
                    .no_foreign_key()
                    .nullable(false),
                field("id_user")
                    .of_type("bigint")
                    .primary_key(false)
                    .foreign_key_to("user")
                    .nullable(false),
                field("expiration_date")
                    .of_type("date")
                    .primary_key(false)
                    .no_foreign_key()
                    .nullable(false),
                field("cvv")
                    .of_type("char")
                    .primary_key(false)
                    .no_foreign_key()
                    .nullable(false),
            ],
        ),
        TableExpectation::new(
            "payment",
            vec![
                field("id")
                    .of_type("bigint")
                    .primary_key(true)
                    .no_foreign_key()
                    .nullable(false),
                field("amount")
                    .of_type("decimal")
                    .primary_key(false)
                    .no_foreign_key()
                    .nullable(false),
                field("id_user")
                    .of_type("bigint")
                    .primary_key(false)
                    .foreign_key_to("user")
                    .nullable(false),
                field("payment_date")
                    .of_type("datetime")
                    .primary_key(false)
                    .no_foreign_key()
                    .nullable(false),
                field("id_credit_card")
                    .of_type("bigint")
                    .primary_key(false)
                    .foreign_key_to("credit_card")
                    .nullable(false),
            ],
        ),
    ]
}

// -------- Seed name lists --------

pub const GENRES: &[&str] = &[
    "progressive rock",
    "hard rock",
    "progressive pop",
    "power pop",
    "pop rock",
    "viking metal",
    "psychedelic rock",
    "heavy metal",
    "thrash metal",
    "grunge",
    "alternative rock",
    "proto-punk",
];

pub const ARTISTS: &[&str] = &["the doors", "queen", "nirvana", "led zeppelin"];

pub const ALBUMS: &[&str] = &[
    "a night at the opera",
    "strange days",
    "nevermind",
    "in utero",
    "the doors",
    "led zeppelin iii",
    "jazz",
    "sheer heart attack",
];

pub const SONGS: &[&str] = &[
    "smells like teen spirit",
    "breed",
    "heart-shaped box",
    "rape me",
    "light my fire",
    "break on through (to the other side)",
    "people are strange",
    "strange days",
    "immigrant song",
    "don't stop me now",
    "stone cold crazy",
    "bohemian rhapsody",
];

pub const GENRE_NAMES_SQL: &str = "SELECT LOWER(name) AS name FROM genre";
pub const ARTIST_NAMES_SQL: &str = "SELECT LOWER(name) AS name FROM artist";
pub const ALBUM_NAMES_SQL: &str = "SELECT LOWER(title) AS name FROM album";
pub const SONG_NAMES_SQL: &str = "SELECT LOWER(title) AS name FROM song";

// -------- Relation expectations --------

pub const SONG_ARTISTS_SQL: &str = "SELECT LOWER(a.name) AS name \
     FROM artist a \
     JOIN song_artist sa ON a.id = sa.id_artist \
     JOIN song s ON s.id = sa.id_song \
     WHERE s.title = ?";

pub const SONG_ARTISTS: &[RelationExpectation] = &[
    RelationExpectation { key: "smells like teen spirit", related: &["nirvana"] },
    RelationExpectation { key: "breed", related: &["nirvana"] },
    RelationExpectation { key: "heart-shaped box", related: &["nirvana"] },
    RelationExpectation { key: "rape me", related: &["nirvana"] },
    RelationExpectation { key: "light my fire", related: &["the doors"] },
    RelationExpectation { key: "break on through (to the other side)", related: &["the doors"] },
    RelationExpectation { key: "people are strange", related: &["the doors"] },
    RelationExpectation { key: "strange days", related: &["the doors"] },
    RelationExpectation { key: "immigrant song", related: &["led zeppelin"] },
    RelationExpectation { key: "don't stop me now", related: &["queen"] },
    RelationExpectation { key: "stone cold crazy", related: &["queen"] },
    RelationExpectation { key: "bohemian rhapsody", related: &["queen"] },
];

pub const SONG_ALBUMS_SQL: &str = "SELECT LOWER(a.title) AS name \
     FROM album a \
     JOIN song_album sa ON a.id = sa.id_album \
     JOIN song s ON s.id = sa.id_song \
     WHERE s.title = ?";

pub const SONG_ALBUMS: &[RelationExpectation] = &[
    RelationExpectation { key: "smells like teen spirit", related: &["nevermind"] },
    RelationExpectation { key: "breed", related: &["nevermind"] },
    RelationExpectation { key: "heart-shaped box", related: &["in utero"] },
    RelationExpectation { key: "rape me", related: &["in utero"] },
    RelationExpectation { key: "light my fire", related: &["the doors"] },
    RelationExpectation { key: "break on through (to the other side)", related: &["the doors"] },
    RelationExpectation { key: "people are strange", related: &["strange days"] },
    RelationExpectation { key: "strange days", related: &["strange days"] },
    RelationExpectation { key: "immigrant song", related: &["led zeppelin iii"] },
    RelationExpectation { key: "don't stop me now", related: &["jazz"] },
    RelationExpectation { key: "stone cold crazy", related: &["sheer heart attack"] },
    RelationExpectation { key: "bohemian rhapsody", related: &["a night at the opera"] },
];

pub const SONG_GENRES_SQL: &str = "SELECT LOWER(g.name) AS name \
     FROM genre g \
     JOIN song_genre sg ON g.id = sg.id_genre \
     JOIN song s ON s.id = sg.id_song \
     WHERE s.title = ?";

pub const SONG_GENRES: &[RelationExpectation] = &[
    RelationExpectation { key: "smells like teen spirit", related: &["grunge"] },
    RelationExpectation { key: "breed", related: &["grunge"] },
    RelationExpectation { key: "heart-shaped box", related: &["grunge"] },
    RelationExpectation { key: "rape me", related: &["grunge"] },
    RelationExpectation { key: "light my fire", related: &["psychedelic rock"] },
    RelationExpectation {
        key: "break on through (to the other side)",
        related: &["psychedelic rock", "proto-punk"],
    },
    RelationExpectation { key: "people are strange", related: &["psychedelic rock"] },
    RelationExpectation { key: "strange days", related: &["psychedelic rock"] },
    RelationExpectation { key: "immigrant song", related: &["hard rock", "viking metal"] },
    RelationExpectation { key: "don't stop me now", related: &["power pop", "pop rock"] },
    RelationExpectation {
        key: "stone cold crazy",
        related: &["heavy metal", "hard rock", "thrash metal"],
    },
    RelationExpectation {
        key: "bohemian rhapsody",
        related: &["progressive rock", "hard rock", "progressive pop"],
    },
];

pub const ARTIST_ALBUMS_SQL: &str = "SELECT LOWER(a.title) AS name \
     FROM album a \
     JOIN artist_album aa ON a.id = aa.id_album \
     JOIN artist a2 ON a2.id = aa.id_artist \
     WHERE a2.name = ?";

pub const ARTIST_ALBUMS: &[RelationExpectation] = &[
    RelationExpectation {
        key: "queen",
        related: &["a night at the opera", "sheer heart attack", "jazz"],
    },
    RelationExpectation { key: "nirvana", related: &["nevermind", "in utero"] },
    RelationExpectation { key: "the doors", related: &["the doors", "strange days"] },
    RelationExpectation { key: "led zeppelin", related: &["led zeppelin iii"] },
];
