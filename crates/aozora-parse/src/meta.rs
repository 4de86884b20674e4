use serde::{Deserialize, Serialize};

use crate::episode;
use crate::keyword::{TagKind, TAG_KEYS};
use crate::slot::ScheduleSlot;
use crate::tags::split_multi;

/// Typed metadata decoded from an entry's category tags.
///
/// Every field is optional: the catalog mixes fully-tagged posts with
/// bare announcement posts carrying genres only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mal_id: Option<u64>,
    /// Episode number as tagged ("12", "12.5").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<String>,
    /// Episode number parsed for ordering, when numeric.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_number: Option<f64>,
    /// Release quality label (e.g. "BD", "WEB").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    /// Available resolutions, pipe-split from a single tag.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub resolutions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    /// Airing status ("ongoing", "completed").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Viewer rating ("8.7").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    /// Media type ("TV", "Movie", "OVA").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anime_type: Option<String>,
    /// Weekly airing slot, when the post is on the schedule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<ScheduleSlot>,
    /// Bare (colon-free) tags.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub genres: Vec<String>,
}

impl EntryMeta {
    /// Decode a flat category-tag list in one pass.
    ///
    /// Keyed fields keep the first occurrence; later duplicates are
    /// ignored. Bare tags accumulate as genres in order.
    pub fn from_tags(tags: &[String]) -> Self {
        let mut meta = Self::default();
        for tag in tags {
            let Some((key, value)) = tag.split_once(':') else {
                meta.genres.push(tag.clone());
                continue;
            };
            match TAG_KEYS.get(key) {
                Some(TagKind::MalId) => {
                    if meta.mal_id.is_none() {
                        meta.mal_id = value.trim().parse().ok();
                    }
                }
                Some(TagKind::Episode) => {
                    if meta.episode.is_none() {
                        meta.episode_number = episode::episode_number(value);
                        meta.episode = Some(value.to_string());
                    }
                }
                Some(TagKind::Quality) => {
                    if meta.quality.is_none() {
                        meta.quality = Some(value.to_string());
                    }
                }
                Some(TagKind::Resolution) => {
                    if meta.resolutions.is_empty() {
                        meta.resolutions =
                            split_multi(value).into_iter().map(str::to_string).collect();
                    }
                }
                Some(TagKind::Season) => {
                    if meta.season.is_none() {
                        meta.season = Some(value.to_string());
                    }
                }
                Some(TagKind::Status) => {
                    if meta.status.is_none() {
                        meta.status = Some(value.to_string());
                    }
                }
                Some(TagKind::Rating) => {
                    if meta.rating.is_none() {
                        meta.rating = Some(value.to_string());
                    }
                }
                Some(TagKind::Type) => {
                    if meta.anime_type.is_none() {
                        meta.anime_type = Some(value.to_string());
                    }
                }
                Some(TagKind::Schedule) => {
                    if meta.slot.is_none() {
                        meta.slot = ScheduleSlot::parse(value);
                        if meta.slot.is_none() {
                            tracing::debug!(tag = %tag, "unparseable schedule tag");
                        }
                    }
                }
                // Keyed but unknown: opaque to us, ignored.
                None => {}
            }
        }
        meta
    }
}
