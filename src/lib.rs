// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod config;
pub mod engine;
pub mod feedback;
pub mod runtime;
pub mod util;
pub mod words;

/// Runtime tick interval. The visible round timer only changes once per
/// second; ticking faster keeps feedback expiry responsive.
pub const TICK_RATE_MS: u64 = 250;
