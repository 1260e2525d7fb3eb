/// Like `tracing::info!`, but also reports how long something took.
/// Pass the `chrono::Local` timestamp captured when the work started.
/// ```ignore
/// let time = Local::now();
/// info_took!(time, "fetched {} pages", 12);
/// ```
#[macro_export]
macro_rules! info_took {
    ($start:expr, $strfm:literal $(,)? $($arg:expr),*) => {{
        let took_secs = (::chrono::Local::now() - $start)
            .num_microseconds()
            .map(|n| n as f64 / 1_000_000.0)
            .unwrap_or(0.0);
        ::tracing::info!(took_secs, $strfm, $($arg),*);
    }};
}
