use std::sync::Once;

use simplelog::{Config, LevelFilter, SimpleLogger};

static INIT: Once = Once::new();

/// Wires up a bare stderr logger so `trace!`/`debug!` output from the writer is visible when
/// running tests with `-- --nocapture`. Idempotent: later calls are no-ops.
pub fn init_logger() {
    INIT.call_once(|| {
        let _ = SimpleLogger::init(LevelFilter::Trace, Config::default());
    });
}
