// handlers/mod.rs - HTTP handlers
//
// admin:  privileged user administration (list, invite, delete); the
//         privilege gate runs inside every call, never in a shared layer.
// health: liveness plus a profile store ping.

pub mod admin;
pub mod health;

pub use health::health;
