use tracing::Level;
use tracing::level_filters::LevelFilter;

/// Level used until the configuration has been read.
pub const BOOT_LEVEL: Level = Level::INFO;

/// Map a configured level name onto a filter. Unknown names fall back to info.
pub fn level_filter(name: &str) -> LevelFilter {
    name.trim()
        .parse::<Level>()
        .map_or(LevelFilter::from_level(BOOT_LEVEL), LevelFilter::from_level)
}
