const MAX_JOBS: usize = 32;

fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .clamp(1, MAX_JOBS)
}

fn parse_jobs(raw: Option<&str>, default_value: usize) -> usize {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default_value)
        .clamp(1, MAX_JOBS)
}

/// Number of document pairs aligned at once: `--jobs`, then `TOKDIFF_JOBS`,
/// then the available parallelism.
pub(crate) fn resolve_jobs(flag: Option<usize>) -> usize {
    match flag {
        Some(jobs) => jobs.clamp(1, MAX_JOBS),
        None => {
            let raw = std::env::var("TOKDIFF_JOBS").ok();
            parse_jobs(raw.as_deref(), default_jobs())
        }
    }
}
