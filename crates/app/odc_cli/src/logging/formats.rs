use flexi_logger::DeferredNow;
use log::{Level, Record};

/// Compact `LEVEL message` lines; debug and trace records also carry the module path.
pub fn cli_format(
    w: &mut dyn std::io::Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    match record.level() {
        Level::Debug | Level::Trace => write!(
            w,
            "{:<5} [{}] {}",
            record.level(),
            record.module_path().unwrap_or("<unnamed>"),
            record.args()
        ),
        level => write!(w, "{:<5} {}", level, record.args()),
    }
}
