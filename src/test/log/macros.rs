use crate::log::LOGGER;
use std::sync::atomic::{AtomicUsize, Ordering};

static EVALUATIONS: AtomicUsize = AtomicUsize::new(0);

fn counted(label: &str) -> String {
    EVALUATIONS.fetch_add(1, Ordering::Relaxed);
    label.to_string()
}

// The global logger is never enabled by tests, so entries must be dropped
// before their arguments are formatted.
#[test]
fn disabled_macros_skip_their_arguments() {
    assert!(!crate::debug_enabled!());
    assert_eq!(crate::debug_enabled!(), LOGGER.is_debug_enabled());

    crate::log_debug!("screen {}", counted("Connect"));
    crate::log_info!("saved {}", counted("vms.json"));
    crate::log_warn!("skipped {}", counted("entry"));
    crate::log_error!("unreadable {}", counted("store"));

    assert_eq!(EVALUATIONS.load(Ordering::Relaxed), 0);
}
