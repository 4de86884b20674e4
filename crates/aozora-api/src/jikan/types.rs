use serde::Deserialize;

// ── Response envelope ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct Data<T> {
    pub data: T,
}

// ── Anime detail (`/anime/{id}/full`) ───────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct AnimeFull {
    pub mal_id: u64,
    pub title: String,
    pub title_english: Option<String>,
    pub title_japanese: Option<String>,
    pub images: Option<Images>,
    pub episodes: Option<u32>,
    pub status: Option<String>,
    pub score: Option<f32>,
    pub rank: Option<u32>,
    pub synopsis: Option<String>,
    pub season: Option<String>,
    pub year: Option<u32>,
    pub broadcast: Option<Broadcast>,
    #[serde(default)]
    pub genres: Vec<NamedRef>,
    #[serde(default)]
    pub studios: Vec<NamedRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedRef {
    pub mal_id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Broadcast {
    pub day: Option<String>,
    pub time: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Images {
    pub jpg: Option<ImageSet>,
    pub webp: Option<ImageSet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageSet {
    pub image_url: Option<String>,
    pub large_image_url: Option<String>,
}

impl Images {
    /// Best available URL: prefer webp over jpg, large over small.
    pub fn best_url(&self) -> Option<String> {
        self.webp
            .as_ref()
            .and_then(|s| s.large_image_url.clone().or_else(|| s.image_url.clone()))
            .or_else(|| {
                self.jpg
                    .as_ref()
                    .and_then(|s| s.large_image_url.clone().or_else(|| s.image_url.clone()))
            })
    }
}

// ── Characters (`/anime/{id}/characters`) ───────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CharacterEdge {
    pub character: CharacterRef,
    pub role: Option<String>,
    pub favorites: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CharacterRef {
    pub mal_id: u64,
    pub name: String,
    pub images: Option<Images>,
}

// ── Statistics (`/anime/{id}/statistics`) ───────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub watching: u64,
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub on_hold: u64,
    #[serde(default)]
    pub dropped: u64,
    #[serde(default)]
    pub plan_to_watch: u64,
    #[serde(default)]
    pub total: u64,
}
