use anyhow::Context;
use flexi_logger::{FileSpec, Logger, LoggerHandle};

const LOG_BASENAME: &str = "mkdd_bol_editor";
const DEFAULT_LEVEL: &str = "info";

/// Starts the logger. `RUST_LOG` overrides the level.
///
/// With the `stderr_log` feature logs go to stderr, otherwise they are
/// appended to `mkdd_bol_editor.log` in the temp directory. The returned
/// handle has to stay alive for as long as anything is logged.
pub fn init() -> anyhow::Result<LoggerHandle> {
    let logger = Logger::try_with_env_or_str(DEFAULT_LEVEL)
        .with_context(|| "failed to parse log specification")?
        .format(flexi_logger::detailed_format);
    let logger = if cfg!(feature = "stderr_log") {
        logger.log_to_stderr()
    } else {
        logger
            .log_to_file(
                FileSpec::default()
                    .directory(std::env::temp_dir())
                    .basename(LOG_BASENAME)
                    .suppress_timestamp(),
            )
            .append()
    };
    logger.start().with_context(|| "failed to start logger")
}
