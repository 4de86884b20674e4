use phf::phf_map;

/// The metadata field a known tag key populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    MalId,
    Episode,
    Quality,
    Resolution,
    Season,
    Status,
    Rating,
    Schedule,
    Type,
}

/// Compile-time lookup table of known tag keys.
///
/// Keys not in this table (but carrying a colon) are opaque and ignored;
/// colon-free tags are genres.
pub static TAG_KEYS: phf::Map<&'static str, TagKind> = phf_map! {
    "mal_id" => TagKind::MalId,
    "episode" => TagKind::Episode,
    "quality" => TagKind::Quality,
    "resolution" => TagKind::Resolution,
    "season" => TagKind::Season,
    "status" => TagKind::Status,
    "rate" => TagKind::Rating,
    "schedule" => TagKind::Schedule,
    "type" => TagKind::Type,
};
