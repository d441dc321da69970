//! Aggregate copy strategies used by `OrderedCatalog::duplicate`.
//!
//! Every copy has its own id and the ids of all owned children cleared so the
//! repository assigns fresh ones. Positions are kept: the root position is
//! overwritten by the catalog, child positions keep their relative order.
//! Genre and picture references are copied by value.

use crate::catalog::Movable;

use super::types::{Game, Genre, Movie, Music, Picture, Program, Show};

fn detached<M: Movable + Clone>(item: &M) -> M {
    let mut copy = item.clone();
    copy.set_id(None);
    copy
}

fn clear_id<M: Movable>(item: &mut M) {
    item.set_id(None);
}

/// Copies a movie and its media.
pub fn copy_movie(movie: &Movie) -> Movie {
    let mut copy = detached(movie);
    copy.media.iter_mut().for_each(clear_id);
    copy
}

/// Copies a show, its seasons and their episodes.
pub fn copy_show(show: &Show) -> Show {
    let mut copy = detached(show);
    for season in &mut copy.seasons {
        clear_id(season);
        season.episodes.iter_mut().for_each(clear_id);
    }
    copy
}

/// Copies a music album and its songs.
pub fn copy_music(music: &Music) -> Music {
    let mut copy = detached(music);
    copy.songs.iter_mut().for_each(clear_id);
    copy
}

pub fn copy_game(game: &Game) -> Game {
    detached(game)
}

pub fn copy_program(program: &Program) -> Program {
    detached(program)
}

pub fn copy_genre(genre: &Genre) -> Genre {
    detached(genre)
}

pub fn copy_picture(picture: &Picture) -> Picture {
    detached(picture)
}
