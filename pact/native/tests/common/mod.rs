//! Shared test harness: routes `log` records to stdout, once per binary.

use once_cell::sync::Lazy;

struct PrintLogger;

impl log::Log for PrintLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        println!(
            "[{:5}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

static LOGGER: PrintLogger = PrintLogger;

static INSTALLED: Lazy<()> = Lazy::new(|| {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(log::LevelFilter::Trace);
});

pub fn init_logging() {
    Lazy::force(&INSTALLED);
}
