//! Thresholds and cooldown windows for the telemetry engine.
//!
//! These are product-tuned values, not transport limits. Cooldowns exist
//! to keep a scrolling feed from hammering the collector; thresholds
//! separate deliberate watching from flicks past an item.

// === Watch classification ===

/// Watch time below which a `stop()` is classified as a SKIP.
///
/// Under 3 seconds the viewer flicked past; at or above it they gave the
/// item a real chance and the session counts as a view.
pub const SKIP_THRESHOLD_MS: u64 = 3000;

/// Minimum watch time for a raw watch-duration event to be reported.
///
/// Sub-second observations carry no signal and are dropped before they
/// reach the network.
pub const MIN_WATCH_DURATION_MS: u64 = 1000;

// === Dedup cooldowns ===

/// Cooldown per (content, interaction) pair for discovery events.
pub const DISCOVERY_COOLDOWN_MS: u64 = 2000;

/// Cooldown per content item for raw post-view events.
pub const POST_VIEW_COOLDOWN_MS: u64 = 5000;

/// Cooldown per profile for profile-view events.
///
/// Longer than the post window: profile pages are revisited within one
/// browsing gesture far more often than individual posts.
pub const PROFILE_VIEW_COOLDOWN_MS: u64 = 10_000;

// === Impression batching ===

/// Delay between the first enqueued impression and the batch flush.
///
/// Long enough to coalesce one scroll burst, short enough that the
/// impression still lands while the content is on screen.
pub const IMPRESSION_FLUSH_DELAY_MS: u64 = 500;
