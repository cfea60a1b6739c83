//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=info cargo run                       # notifications, deletes, fetch results
//! RUST_LOG=debug cargo run                      # every command and request
//! RUST_LOG=list_framework::controller=debug cargo run
//! ```
//!
//! Controller events carry structured fields (`resource`, `generation`, `id`,
//! `remaining`), so a delete drain reads like:
//!
//! ```text
//! INFO Deletion started resource="screens" count=2
//! INFO Deleted resource="screens" id=1 remaining=1
//! INFO Deleted resource="screens" id=2 remaining=0
//! INFO Deletion completed resource="screens" deleted=2
//! ```

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
