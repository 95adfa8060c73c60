//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter driven by
//! `RUST_LOG`. Without `RUST_LOG` only `info` and above are shown.
//!
//! ## What Gets Traced
//!
//! - **Cart actor lifecycle**: start (policy, stocked items) and shutdown (final size)
//! - **Cart requests**: every request at `debug`, real mutations at `info`
//! - **Region refreshes**: one span per request with its token; stale discards at `debug`, failures at `warn`
//!
//! ```bash
//! RUST_LOG=debug cargo run
//! ```
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Cart actor started policy=AssumeInStock stocked=3
//! INFO Cart updated item_id=1 outcome=Inserted size=1
//! INFO Checkout path="/order/1,2,11,1"
//! INFO Cart actor shutdown size=2 units=3
//! ```
//!
//! With `debug`, each refresh shows its span inline, e.g.
//! `DEBUG refresh_results{token=3 query="cha"}: Region updated region="results" token=#3`.

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
