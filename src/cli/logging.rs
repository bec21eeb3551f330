/// Levels accepted by `--log-level`.
const LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Resolve a `--log-level` value to a filter directive. Unknown values warn
/// on stderr and fall back to `off`.
pub fn resolve_level(requested: Option<&str>) -> &'static str {
    let Some(level) = requested else {
        return "off";
    };
    match LEVELS.iter().find(|l| l.eq_ignore_ascii_case(level)) {
        Some(known) => *known,
        None => {
            super::output::warning(&format!(
                "unknown log level '{}', logging disabled (use: {})",
                level,
                LEVELS.join(", ")
            ));
            "off"
        }
    }
}

/// Install the stderr tracing subscriber. Stdout is reserved for the status
/// line. Safe to call more than once.
pub fn init(requested: Option<&str>) {
    let filter = resolve_level(requested);
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
