use std::{fs::File, io, path::PathBuf, sync::Once};

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "words=debug"). When `log_file` is set, records go there instead of
/// stderr, which the terminal UI owns.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub log_file: Option<PathBuf>,
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) -> io::Result<()> {
    let mut result = Ok(());

    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        if let Some(path) = config.log_file {
            match File::create(&path) {
                Ok(file) => {
                    builder
                        .target(env_logger::Target::Pipe(Box::new(file)))
                        .write_style(env_logger::WriteStyle::Never);
                }
                Err(err) => {
                    result = Err(err);
                    return;
                }
            }
        }

        builder.init();
        log::debug!("logging initialized");
    });

    result
}
