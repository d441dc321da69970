mod catalogs;
mod copy;
mod types;

pub use catalogs::{
    games, genres, movies, music, pictures, programs, shows, GameCatalog, GenreCatalog,
    MovieCatalog, MusicCatalog, PictureCatalog, ProgramCatalog, ShowCatalog,
};
pub use copy::{
    copy_game, copy_genre, copy_movie, copy_music, copy_picture, copy_program, copy_show,
};
pub use types::{
    Episode, Game, Genre, Language, Medium, Movie, Music, Picture, Program, Season, Show, Song,
};
