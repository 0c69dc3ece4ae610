use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose console output when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

// Assets
pub const CREST_PATH: &str = "/assets/images/club/fc-barcelona.svg";
pub const HERO_VIDEO_PATH: &str = "/assets/videos/bg-gsap-test.mp4";
pub const HERO_IMAGE_PATH: &str = "/assets/images/trio-barca.webp";
pub const ANTHEM_PATH: &str = "/assets/audio/barca-anthem-compress.mp3";
pub const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed";

// Page loader
pub const HOME_MIN_LOAD_MS: u32 = 2500;
pub const DEFAULT_MIN_LOAD_MS: u32 = 2000;
pub const PROGRESS_TICK_MS: u32 = 150;
pub const PROGRESS_CAP: f64 = 90.0;
pub const PROGRESS_MAX_STEP: f64 = 12.0;
pub const REVEAL_DELAY_MS: u32 = 300;
pub const EXIT_DELAY_MS: u32 = 600;

// Standalone loading view
pub const LOADING_TICK_MS: u32 = 200;
pub const LOADING_MAX_STEP: f64 = 15.0;

// Navigation
pub const NAV_COMPACT_THRESHOLD_PX: f64 = 50.0;

// Scroll-scrubbed video
pub const VIDEO_REGION_VH: f64 = 250.0;
pub const SCRUB_LERP: f64 = 0.1;
pub const SEEK_THRESHOLD_S: f64 = 0.02;
pub const BLOB_PRELOAD_DELAY_MS: u32 = 1000;

// Marquee
pub const MARQUEE_BASE_VELOCITY: f64 = 70.0;
