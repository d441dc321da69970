use serde::{Deserialize, Serialize};

use crate::catalog::{assign_missing_id, Entity, Movable};

/// Implements [`Movable`] for structs carrying `id` and `position` fields.
macro_rules! impl_movable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Movable for $ty {
                fn id(&self) -> Option<i64> {
                    self.id
                }

                fn set_id(&mut self, id: Option<i64>) {
                    self.id = id;
                }

                fn position(&self) -> i32 {
                    self.position
                }

                fn set_position(&mut self, position: i32) {
                    self.position = position;
                }
            }
        )+
    };
}

impl_movable!(Movie, Medium, Show, Season, Episode, Music, Song, Game, Program, Genre, Picture);

/// Audio or subtitle language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
    Cz,
    En,
    Fr,
    Ja,
    Sk,
}

/// A movie, owning the physical media it is stored on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Movie {
    pub id: Option<i64>,
    pub position: i32,
    pub czech_name: String,
    pub original_name: String,
    pub year: i32,
    pub language: Option<Language>,
    pub subtitles: Vec<Language>,
    pub media: Vec<Medium>,
    pub imdb_code: Option<i32>,
    pub wiki_en: Option<String>,
    pub wiki_cz: Option<String>,
    /// Id of the poster in the pictures catalog.
    pub picture: Option<i64>,
    pub note: Option<String>,
    /// Ids of referenced genres. Not owned.
    pub genres: Vec<i64>,
}

/// One disc or file of a movie.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Medium {
    pub id: Option<i64>,
    pub position: i32,
    /// Length in seconds.
    pub length: i32,
}

impl Medium {
    pub fn new(length: i32) -> Self {
        Self {
            length,
            ..Self::default()
        }
    }
}

/// A TV show, owning its seasons.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Show {
    pub id: Option<i64>,
    pub position: i32,
    pub czech_name: String,
    pub original_name: String,
    pub imdb_code: Option<i32>,
    pub wiki_en: Option<String>,
    pub wiki_cz: Option<String>,
    pub picture: Option<i64>,
    pub note: Option<String>,
    pub genres: Vec<i64>,
    pub seasons: Vec<Season>,
}

/// A season of a show, owning its episodes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Season {
    pub id: Option<i64>,
    pub position: i32,
    pub number: i32,
    pub start_year: i32,
    pub end_year: i32,
    pub language: Option<Language>,
    pub subtitles: Vec<Language>,
    pub note: Option<String>,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Episode {
    pub id: Option<i64>,
    pub position: i32,
    pub number: i32,
    pub name: String,
    /// Length in seconds.
    pub length: i32,
    pub note: Option<String>,
}

/// A music album, owning its songs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Music {
    pub id: Option<i64>,
    pub position: i32,
    pub name: String,
    pub wiki_en: Option<String>,
    pub wiki_cz: Option<String>,
    pub media_count: i32,
    pub note: Option<String>,
    pub songs: Vec<Song>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Song {
    pub id: Option<i64>,
    pub position: i32,
    pub name: String,
    /// Length in seconds.
    pub length: i32,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Game {
    pub id: Option<i64>,
    pub position: i32,
    pub name: String,
    pub wiki_en: Option<String>,
    pub wiki_cz: Option<String>,
    pub media_count: i32,
    pub format: Option<String>,
    pub crack: bool,
    pub serial_key: bool,
    pub patch: bool,
    pub trainer: bool,
    pub cheat: bool,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Program {
    pub id: Option<i64>,
    pub position: i32,
    pub name: String,
    pub wiki_en: Option<String>,
    pub wiki_cz: Option<String>,
    pub media_count: i32,
    pub format: Option<String>,
    pub crack: bool,
    pub serial_key: bool,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Genre {
    pub id: Option<i64>,
    pub position: i32,
    pub name: String,
}

impl Genre {
    /// Creates an unsaved genre.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Raw image bytes (posters, covers).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Picture {
    pub id: Option<i64>,
    pub position: i32,
    pub content: Vec<u8>,
}

impl Entity for Movie {
    const KIND: &'static str = "Movie";

    fn assign_ids(&mut self, next_id: &mut dyn FnMut() -> i64) {
        assign_missing_id(self, next_id);
        for medium in &mut self.media {
            assign_missing_id(medium, next_id);
        }
    }

    fn max_id(&self) -> Option<i64> {
        self.media.iter().map(Movable::id).fold(self.id, Option::max)
    }
}

impl Entity for Show {
    const KIND: &'static str = "Show";

    fn assign_ids(&mut self, next_id: &mut dyn FnMut() -> i64) {
        assign_missing_id(self, next_id);
        for season in &mut self.seasons {
            assign_missing_id(season, next_id);
            for episode in &mut season.episodes {
                assign_missing_id(episode, next_id);
            }
        }
    }

    fn max_id(&self) -> Option<i64> {
        self.seasons
            .iter()
            .flat_map(|season| {
                std::iter::once(season.id).chain(season.episodes.iter().map(Movable::id))
            })
            .fold(self.id, Option::max)
    }
}

impl Entity for Music {
    const KIND: &'static str = "Music";

    fn assign_ids(&mut self, next_id: &mut dyn FnMut() -> i64) {
        assign_missing_id(self, next_id);
        for song in &mut self.songs {
            assign_missing_id(song, next_id);
        }
    }

    fn max_id(&self) -> Option<i64> {
        self.songs.iter().map(Movable::id).fold(self.id, Option::max)
    }
}

impl Entity for Game {
    const KIND: &'static str = "Game";
}

impl Entity for Program {
    const KIND: &'static str = "Program";
}

impl Entity for Genre {
    const KIND: &'static str = "Genre";
}

impl Entity for Picture {
    const KIND: &'static str = "Picture";
}
