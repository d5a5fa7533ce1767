//! Built-in demo catalog.

use crate::catalog::{Catalog, Episode, Genre, Series, SeriesStatus};

const IMAGE_HOST: &str = "https://images.unsplash.com";
const PANEL_PHOTO_BASE: u64 = 1_550_000_000_000;

struct SeriesRow {
    id: &'static str,
    title: &'static str,
    author: &'static str,
    genre: &'static str,
    status: SeriesStatus,
    rating: f32,
    rank: u32,
    photo: &'static str,
    synopsis: &'static str,
    subscribers: u64,
    total_likes: u64,
}

// (series, number, title, upload date, thumbnail photo, panels, likes)
type EpisodeRow = (
    &'static str,
    u32,
    &'static str,
    &'static str,
    &'static str,
    usize,
    u64,
);

const SERIES: &[SeriesRow] = &[
    SeriesRow {
        id: "s1",
        title: "Honey Trap",
        author: "Sarah Kim",
        genre: "Drama",
        status: SeriesStatus::Ongoing,
        rating: 9.89,
        rank: 1,
        photo: "1618336753974-aae8e04506aa",
        synopsis: "In a world where appearances deceive, Mina uncovers a secret that turns her life upside down.",
        subscribers: 2_450_000,
        total_likes: 15_800_000,
    },
    SeriesRow {
        id: "s2",
        title: "Lore Olympus",
        author: "Rachel Smythe",
        genre: "Romance",
        status: SeriesStatus::Ongoing,
        rating: 9.76,
        rank: 2,
        photo: "1551269901-5c5e14c25df7",
        synopsis: "Greek mythology retold. Persephone, goddess of spring, discovers the intrigues of a modern Olympus.",
        subscribers: 5_200_000,
        total_likes: 45_000_000,
    },
    SeriesRow {
        id: "s3",
        title: "Tower of God",
        author: "SIU",
        genre: "Action",
        status: SeriesStatus::Ongoing,
        rating: 9.65,
        rank: 3,
        photo: "1519681393784-d120267933ba",
        synopsis: "Bam enters a mysterious tower to find his friend. What waits inside is beyond imagination.",
        subscribers: 4_800_000,
        total_likes: 38_000_000,
    },
    SeriesRow {
        id: "s4",
        title: "True Beauty",
        author: "Yaongyi",
        genre: "Romance",
        status: SeriesStatus::Completed,
        rating: 9.52,
        rank: 4,
        photo: "1529626455594-4ff0802cfb7e",
        synopsis: "Jugyeong has mastered the art of makeup. What happens when her secret comes out?",
        subscribers: 6_100_000,
        total_likes: 52_000_000,
    },
    SeriesRow {
        id: "s5",
        title: "Omniscient Reader",
        author: "Sing Shong",
        genre: "Fantasy",
        status: SeriesStatus::Ongoing,
        rating: 9.81,
        rank: 5,
        photo: "1507003211169-0a1dd7228f2d",
        synopsis: "Kim Dokja is the only one who read the novel to the end. Now he lives inside it.",
        subscribers: 3_900_000,
        total_likes: 29_000_000,
    },
    SeriesRow {
        id: "s6",
        title: "The Remarried Empress",
        author: "Alpha Tart",
        genre: "Drama",
        status: SeriesStatus::Ongoing,
        rating: 9.45,
        rank: 6,
        photo: "1531746020798-e6953c6e8e04",
        synopsis: "The perfect empress is betrayed, and decides to marry the emperor of the neighbouring kingdom.",
        subscribers: 3_200_000,
        total_likes: 24_000_000,
    },
    SeriesRow {
        id: "s7",
        title: "Unordinary",
        author: "uru-chan",
        genre: "Action",
        status: SeriesStatus::Ongoing,
        rating: 9.38,
        rank: 7,
        photo: "1492446845049-9c50cc313f00",
        synopsis: "In a world where powers define the hierarchy, John hides a dangerous secret.",
        subscribers: 2_800_000,
        total_likes: 21_000_000,
    },
    SeriesRow {
        id: "s8",
        title: "Let's Play",
        author: "Mongie",
        genre: "Comedy",
        status: SeriesStatus::Completed,
        rating: 9.21,
        rank: 8,
        photo: "1554151228-14d9def656e4",
        synopsis: "Sam, a game developer, has her life turned around by her new influencer neighbour.",
        subscribers: 2_100_000,
        total_likes: 18_000_000,
    },
    SeriesRow {
        id: "s9",
        title: "I Love Yoo",
        author: "Quimchee",
        genre: "Drama",
        status: SeriesStatus::Ongoing,
        rating: 9.15,
        rank: 9,
        photo: "1502823403499-6ccfcf4fb453",
        synopsis: "Shin-Ae avoids relationships, until two brothers change her outlook on life.",
        subscribers: 1_900_000,
        total_likes: 15_000_000,
    },
];

const EPISODES: &[EpisodeRow] = &[
    ("s1", 1, "The Beginning", "2025-12-01", "1534528741775-53994a69daeb", 8, 145_000),
    ("s1", 2, "An Unexpected Meeting", "2025-12-08", "1517841905240-472988babdf9", 10, 138_000),
    ("s1", 3, "The Trap Closes", "2025-12-15", "1524504388940-b1c1722653e1", 9, 152_000),
    ("s1", 4, "Revelations", "2025-12-22", "1488426862026-3ee34a7d66df", 11, 167_000),
    ("s1", 5, "The Truth Breaks Out", "2026-01-05", "1494790108377-be9c29b29330", 10, 189_000),
    ("s2", 1, "Welcome to Olympus", "2025-11-15", "1507003211169-0a1dd7228f2d", 12, 890_000),
    ("s2", 2, "The Gods' Ball", "2025-11-22", "1539571696357-5a69c17a67c6", 11, 756_000),
    ("s2", 3, "Divine Secrets", "2025-11-29", "1506794778202-cad84cf45f1d", 10, 823_000),
    ("s3", 1, "The Door", "2025-10-01", "1470071459604-3b5ec3a7fe05", 15, 456_000),
    ("s3", 2, "First Floor", "2025-10-08", "1464822759023-fed622ff2c3b", 14, 412_000),
    ("s4", 1, "The Secret", "2025-09-01", "1544005313-94ddf0286df2", 10, 678_000),
    ("s5", 1, "The End of the World", "2025-08-15", "1492571350019-22de08371fd3", 13, 534_000),
    ("s6", 1, "The Betrayal", "2025-07-01", "1508214751196-bcfd4ca60f91", 11, 423_000),
    ("s7", 1, "Powerless", "2025-06-15", "1500648767791-00dcc994a43e", 9, 312_000),
    ("s8", 1, "New Neighbour", "2025-05-01", "1438761681033-6461ffad8d80", 10, 267_000),
    ("s9", 1, "A Forced Meeting", "2025-04-15", "1489424731084-a5d8b219a5bb", 8, 198_000),
];

// (id, name, icon, advertised count)
const GENRES: &[(&str, &str, &str, u32)] = &[
    ("romance", "Romance", "💕", 1250),
    ("action", "Action", "⚔️", 890),
    ("drama", "Drama", "🎭", 1100),
    ("fantasy", "Fantasy", "🔮", 760),
    ("comedy", "Comedy", "😂", 650),
    ("thriller", "Thriller", "🔪", 420),
    ("horror", "Horror", "👻", 380),
    ("slice_of_life", "Slice of Life", "☕", 540),
    ("sci_fi", "Sci-Fi", "🚀", 310),
    ("sports", "Sports", "⚽", 180),
    ("historical", "Historical", "🏰", 290),
    ("superhero", "Superhero", "🦸", 220),
];

fn photo_url(photo: &str, width: u32, height: u32) -> String {
    format!("{IMAGE_HOST}/photo-{photo}?w={width}&h={height}&fit=crop")
}

fn panel_urls(count: usize) -> Vec<String> {
    (0..count as u64)
        .map(|i| photo_url(&(PANEL_PHOTO_BASE + i * 1000).to_string(), 800, 1200))
        .collect()
}

fn build_episodes(series_id: &str) -> Vec<Episode> {
    EPISODES
        .iter()
        .filter(|row| row.0 == series_id)
        .map(|&(series_id, number, title, date, photo, panels, likes)| Episode {
            id: format!("{series_id}_e{number}"),
            series_id: series_id.to_string(),
            number,
            title: title.to_string(),
            upload_date: date.to_string(),
            thumbnail_url: photo_url(photo, 200, 150),
            likes,
            images: panel_urls(panels),
        })
        .collect()
}

impl Catalog {
    /// The demo catalog shipped with the application.
    pub fn seed() -> Self {
        let series = SERIES
            .iter()
            .map(|row| Series {
                id: row.id.to_string(),
                title: row.title.to_string(),
                author: row.author.to_string(),
                genre: row.genre.to_string(),
                status: row.status,
                rating: row.rating,
                rank: Some(row.rank),
                thumbnail_url: photo_url(row.photo, 400, 600),
                banner_url: photo_url(row.photo, 800, 500),
                synopsis: row.synopsis.to_string(),
                subscribers: row.subscribers,
                total_likes: row.total_likes,
                episodes: build_episodes(row.id),
            })
            .collect();
        let genres = GENRES
            .iter()
            .map(|&(id, name, icon, count)| Genre {
                id: id.to_string(),
                name: name.to_string(),
                icon: icon.to_string(),
                count,
            })
            .collect();
        Catalog::new(series, genres)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_episode_belongs_to_a_series() {
        let catalog = Catalog::seed();
        let total: usize = catalog.all().iter().map(|s| s.episodes.len()).sum();
        assert_eq!(total, EPISODES.len());
        for series in catalog.all() {
            for episode in &series.episodes {
                assert_eq!(episode.series_id, series.id);
                assert!(episode.id.starts_with(&series.id));
                assert!(episode.upload_date().is_ok());
            }
        }
    }

    #[test]
    fn panel_urls_are_sequential() {
        let urls = panel_urls(2);
        assert_eq!(
            urls,
            vec![
                "https://images.unsplash.com/photo-1550000000000?w=800&h=1200&fit=crop",
                "https://images.unsplash.com/photo-1550000001000?w=800&h=1200&fit=crop",
            ]
        );
    }
}
