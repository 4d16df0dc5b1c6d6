pub mod clock;
pub mod session;

use std::sync::Arc;

use crate::config::Config;

use clock::{Clock, SystemClock};
use session::FormSessionStore;

pub struct AppState {
    pub config: Config,
    pub sessions: Arc<FormSessionStore>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
        let sessions = Arc::new(FormSessionStore::new(
            clock,
            config.form_ttl(),
            config.max_form_sessions,
        ));
        Self { config, sessions }
    }
}
