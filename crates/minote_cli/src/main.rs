//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `minote_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("minote_core ping={}", minote_core::ping());
    println!("minote_core version={}", minote_core::core_version());
}
