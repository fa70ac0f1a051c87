//! Bundled artist/song catalog and the per-mood artist lists.
//!
//! Asset paths are relative to the app bundle; nothing here touches disk.

use serde::Serialize;

use crate::models::Mood;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Song {
    pub id: &'static str,
    pub title: &'static str,
    pub image: &'static str,
    pub file: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Artist {
    pub id: &'static str,
    pub name: &'static str,
    pub image: &'static str,
    pub songs: &'static [Song],
}

/// Artist card on a mood's artist list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodArtist {
    pub id: &'static str,
    pub name: &'static str,
    pub image: &'static str,
}

const fn song(id: &'static str, title: &'static str, image: &'static str, file: &'static str) -> Song {
    Song { id, title, image, file }
}

pub static ARTISTS: &[Artist] = &[
    Artist {
        id: "1",
        name: "Eric Clapton",
        image: "images/eric_clapton.jpg",
        songs: &[
            song("1", "Tears in Heaven", "images/tears_in_heaven.png", "music/tears_in_heaven.mp3"),
            song("2", "Circus Left Town", "images/circus_left_town.jpg", "music/circus_left_town.mp3"),
            song("3", "My Father\u{2019}s Eyes", "images/my_fathers_eyes.webp", "music/my_fathers_eyes.mp3"),
        ],
    },
    Artist {
        id: "2",
        name: "Adele Adkins",
        image: "images/adele_adkins.jpg",
        songs: &[
            song("1", "Someone Like You", "images/someone_like_you.jpg", "music/someone_like_you.mp3"),
            song("2", "Hello", "images/hello.png", "music/hello.mp3"),
            song("3", "All I Ask", "images/all_i_ask.webp", "music/all_i_ask.mp3"),
        ],
    },
    Artist {
        id: "3",
        name: "Nine Inch Nails",
        image: "images/nine_inch_nails.webp",
        songs: &[
            song("1", "Hurt", "images/hurt.jpg", "music/hurt.mp3"),
            song(
                "2",
                "Something I Can Never Have",
                "images/something_i_can_never_have.jpg",
                "music/something_i_can_never_have.mp3",
            ),
        ],
    },
    Artist {
        id: "4",
        name: "Lord Huron",
        image: "images/lord_huron.jpg",
        songs: &[song("1", "The Night We Met", "images/the_night_we_met.jpg", "music/the_night_we_met.mp3")],
    },
    Artist {
        id: "5",
        name: "R.E.M.",
        image: "images/r.e.m.jpeg",
        songs: &[
            song("1", "Everybody Hurts", "images/everybody_hurts.jpg", "music/everybody_hurts.mp3"),
            song("2", "Nightswimming", "images/nightswimming.jpg", "music/nightswimming.mp3"),
        ],
    },
    Artist {
        id: "6",
        name: "The Beatles",
        image: "images/the_beatles.jpg",
        songs: &[
            song("1", "Yesterday", "images/yesterday.jpg", "music/yesterday.mp3"),
            song("2", "Eleanor Rigby", "images/eleanor_rigby.jpg", "music/eleanor_rigby.mp3"),
        ],
    },
    Artist {
        id: "7",
        name: "Bon Iver",
        image: "images/bon_iver.jpg",
        songs: &[
            song("1", "Skinny Love", "images/skinny_love.jpg", "music/skinny_love.mp3"),
            song("2", "Holocene", "images/holocene.jpg", "music/holocene.mp3"),
        ],
    },
    Artist {
        id: "8",
        name: "Elton John",
        image: "images/elton_john.jpg",
        songs: &[
            song("1", "Candle in the Wind", "images/candle_in_the_wind.jpg", "music/candle_in_the_wind.mp3"),
            song(
                "2",
                "Sorry Seems to Be the Hardest Word",
                "images/sorry_seems.jpg",
                "music/sorry_seems.mp3",
            ),
        ],
    },
    Artist {
        id: "9",
        name: "Pearl Jam",
        image: "images/pearl_jam.webp",
        songs: &[
            song("1", "Black", "images/black.jpg", "music/black.mp3"),
            song("2", "Last Kiss", "images/last_kiss.jpg", "music/last_kiss.mp3"),
        ],
    },
    Artist {
        id: "10",
        name: "Simon & Garfunkel",
        image: "images/simon_garfunkel.jpg",
        songs: &[
            song("1", "The Sound of Silence", "images/sound_of_silence.jpg", "music/sound_of_silence.mp3"),
            song(
                "2",
                "Bridge Over Troubled Water",
                "images/bridge_over_troubled_water.jpg",
                "music/bridge_over_troubled_water.mp3",
            ),
        ],
    },
];

const fn card(id: &'static str, name: &'static str, image: &'static str) -> MoodArtist {
    MoodArtist { id, name, image }
}

static HEALING: &[MoodArtist] = &[
    card("michael-jackson", "Michael Jackson", concat!("https://i.scdn.co/image/", "ab6761610000e5eb4f1b3b0b3b0b3b0b3b0b3b0d")),
    card("andra-day", "Andra Day", concat!("https://i.scdn.co/image/", "ab6761610000e5eb4f1b3b0b3b0b3b0b3b0b3b0e")),
];
static MEDITATION: &[MoodArtist] = &[
    card("marconi-union", "Marconi Union", concat!("https://i.scdn.co/image/", "ab6761610000e5eb4f1b3b0b3b0b3b0b3b0b3b0f")),
    card("anoushka-shankar", "Anoushka Shankar", concat!("https://i.scdn.co/image/", "ab6761610000e5eb4f1b3b0b3b0b3b0b3b0b3b1a")),
];
static INSPIRATION: &[MoodArtist] = &[
    card("journey", "Journey Band", concat!("https://i.scdn.co/image/", "ab6761610000e5eb4f1b3b0b3b0b3b0b3b0b3b1b")),
    card("rachel-platten", "Rachel Platten", concat!("https://i.scdn.co/image/", "ab6761610000e5eb4f1b3b0b3b0b3b0b3b0b3b1c")),
];
static FAMILY: &[MoodArtist] = &[
    card("luther-vandross", "Luther Vandross", concat!("https://i.scdn.co/image/", "ab6761610000e5eb4f1b3b0b3b0b3b0b3b0b3b1d")),
    card("sister-sledge", "Sister Sledge", concat!("https://i.scdn.co/image/", "ab6761610000e5eb4f1b3b0b3b0b3b0b3b0b3b1e")),
];
static FRIENDSHIP: &[MoodArtist] = &[
    card("mariah-carey", "Mariah Carey", concat!("https://i.scdn.co/image/", "ab6761610000e5eb4f1b3b0b3b0b3b0b3b0b3b1f")),
    card("demi-lovato", "Demi Lovato", concat!("https://i.scdn.co/image/", "ab6761610000e5eb4f1b3b0b3b0b3b0b3b0b3b2a")),
];
static DANCE: &[MoodArtist] = &[
    card("madonna", "Madonna", concat!("https://i.scdn.co/image/", "ab6761610000e5eb4f1b3b0b3b0b3b0b3b0b3b2b")),
    card("beyonce", "Beyonc\u{e9}", concat!("https://i.scdn.co/image/", "ab6761610000e5eb4f1b3b0b3b0b3b0b3b0b3b2c")),
];
static COUNTRY: &[MoodArtist] = &[
    card("johnny-cash", "Johnny Cash", concat!("https://i.scdn.co/image/", "ab6761610000e5eb4f1b3b0b3b0b3b0b3b0b3b2d")),
    card("dolly-parton", "Dolly Parton", concat!("https://i.scdn.co/image/", "ab6761610000e5eb4f1b3b0b3b0b3b0b3b0b3b2e")),
];

/// Artist cards for a mood.
///
/// The sad board lists the bundled artists, whose ids resolve through [`find_artist`].
pub fn artists_for_mood(mood: Mood) -> Vec<MoodArtist> {
    let remote = match mood {
        Mood::Sad => {
            return ARTISTS
                .iter()
                .map(|a| MoodArtist { id: a.id, name: a.name, image: a.image })
                .collect();
        }
        Mood::Healing => HEALING,
        Mood::Meditation => MEDITATION,
        Mood::Inspiration => INSPIRATION,
        Mood::Family => FAMILY,
        Mood::Friendship => FRIENDSHIP,
        Mood::Dance => DANCE,
        Mood::Country => COUNTRY,
    };
    remote.to_vec()
}

pub fn find_artist(id: &str) -> Option<&'static Artist> {
    ARTISTS.iter().find(|a| a.id == id)
}

/// URL-friendly slug: lowercase, whitespace runs become `-`, anything outside
/// `[a-z0-9-]` is dropped.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_space = false;
    for ch in name.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' {
            out.push(ch);
        }
    }
    out
}

/// Resolve a player route (`/player/{artist}/{song}`) to catalog entries.
pub fn find_song(artist_slug: &str, song_slug: &str) -> Option<(&'static Artist, &'static Song)> {
    let artist = ARTISTS.iter().find(|a| slugify(a.name) == artist_slug)?;
    let song = artist.songs.iter().find(|s| slugify(s.title) == song_slug)?;
    Some((artist, song))
}

/// First mood whose tag or display name contains the query, case-insensitively.
pub fn search_mood(query: &str) -> Option<Mood> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return None;
    }
    Mood::ALL
        .into_iter()
        .find(|m| m.as_str().contains(&q) || m.display_name().to_lowercase().contains(&q))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_matches_player_routes() {
        assert_eq!(slugify("Eric Clapton"), "eric-clapton");
        assert_eq!(slugify("R.E.M."), "rem");
        assert_eq!(slugify("My Father\u{2019}s Eyes"), "my-fathers-eyes");
        assert_eq!(slugify("Simon & Garfunkel"), "simon--garfunkel");
        assert_eq!(slugify("Tears  in\tHeaven"), "tears-in-heaven");
    }

    #[test]
    fn find_song_resolves_slugs() {
        let (artist, song) = find_song("adele-adkins", "someone-like-you").unwrap();
        assert_eq!(artist.name, "Adele Adkins");
        assert_eq!(song.file, "music/someone_like_you.mp3");
        assert!(find_song("adele-adkins", "rolling-in-the-deep").is_none());
        assert!(find_song("nobody", "hello").is_none());
    }

    #[test]
    fn every_mood_has_artists() {
        for mood in Mood::ALL {
            assert!(!artists_for_mood(mood).is_empty(), "{mood} has no artists");
        }
        assert_eq!(artists_for_mood(Mood::Sad).len(), ARTISTS.len());
        let dance = artists_for_mood(Mood::Dance);
        assert_eq!(dance[1].name, "Beyonc\u{e9}");
        assert!(dance[0].image.starts_with("https://i.scdn.co/image/"));
    }

    #[test]
    fn search_matches_tag_or_display_name() {
        assert_eq!(search_mood("  HEAL "), Some(Mood::Healing));
        assert_eq!(search_mood("friend"), Some(Mood::Friendship));
        // "songs" appears in every display name; the first mood wins
        assert_eq!(search_mood("songs"), Some(Mood::Sad));
        assert_eq!(search_mood("polka"), None);
        assert_eq!(search_mood("   "), None);
    }

    #[test]
    fn artist_ids_are_unique() {
        let mut ids: Vec<_> = ARTISTS.iter().map(|a| a.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), ARTISTS.len());
        assert_eq!(find_artist("10").unwrap().name, "Simon & Garfunkel");
    }
}
