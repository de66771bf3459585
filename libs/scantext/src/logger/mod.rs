use log::LevelFilter;
use std::io::Write;

pub fn init_logger_exe() {
    let name = std::env::current_exe()
        .ok()
        .and_then(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
    init_logger(name);
}

/// Installs an `env_logger` that lets everything from `name` through and
/// leaves the rest to `RUST_LOG`.
pub fn init_logger(name: impl Into<String>) {
    let crate_name = name.into().replace('-', "_");

    let result = env_logger::builder()
        .parse_default_env()
        .filter(Some(&crate_name), LevelFilter::Trace)
        .filter(Some("scantext"), LevelFilter::Debug)
        .format(move |f, rec| {
            let now = humantime::format_rfc3339_millis(std::time::SystemTime::now());
            let module = rec.module_path().unwrap_or("<unknown>");
            let line = rec.line().unwrap_or(u32::MIN);
            let level = rec.level();

            writeln!(
                f,
                "[{} {} {} {}:{}] {}",
                level,
                crate_name,
                now,
                module,
                line,
                rec.args()
            )
        })
        .try_init();

    if let Err(e) = result {
        log::warn!("Logger already initialized: {}", e);
    }
}
