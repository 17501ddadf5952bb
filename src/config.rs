// src/config.rs

// Net config
pub const HOST: &str = "academia.srmist.edu.in";
pub const PORT: u16 = 80;
pub const ATTENDANCE_PATH: &str = "/";

// Waiting for the dynamically rendered table
pub const POLL_PAUSE_MS: u64 = 500; // be polite between refetches
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const DISTINCT_ID_FILE: &str = "distinct_id";

// Telemetry
pub const TRACK_HOST: &str = "api.mixpanel.com";
pub const TRACK_PORT: u16 = 80;
pub const TRACK_PATH: &str = "/track";
pub const TRACK_TOKEN: &str = "3eec01e18d86ddd2a94b043de5658718";
pub const TRACK_EVENT: &str = "Times student portal made better";
