use chrono::{DateTime, Utc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// Default directives; `RUST_LOG` takes precedence when set.
pub fn default_directives(debug: bool) -> &'static str {
    if debug {
        "warn,dietly=debug"
    } else {
        "warn"
    }
}

/// Install the stderr subscriber. Safe to call more than once.
pub fn init(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug)));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

/// Identity of one interactive or batch run, attached to its log events.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn start() -> Self {
        let s = Self { id: Uuid::new_v4(), started_at: Utc::now() };
        tracing::info!(session = %s.id, started_at = %s.started_at.to_rfc3339(), "session started");
        s
    }

    pub fn span(&self) -> tracing::Span {
        tracing::info_span!("session", id = %self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_raises_crate_level() {
        assert_eq!(default_directives(false), "warn");
        assert!(default_directives(true).contains("dietly=debug"));
    }

    #[test]
    fn sessions_get_distinct_ids() {
        init(false);
        assert_ne!(Session::start().id, Session::start().id);
    }
}
