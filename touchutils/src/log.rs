use std::path::Path;

use once_cell::sync::OnceCell;
use tracing::error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

const LEVEL_FILTER: LevelFilter = if cfg!(debug_assertions) {
    LevelFilter::DEBUG
} else {
    LevelFilter::INFO
};

static INIT: OnceCell<()> = OnceCell::new();

pub fn init_log(log_dir: Option<&Path>, verbose: bool) {
    INIT.get_or_init(|| {
        let level = if verbose { LevelFilter::DEBUG } else { LEVEL_FILTER };

        std::panic::set_hook(Box::new(move |info| {
            error!("touchutils panicked: {}", info);
        }));

        let file_layer = log_dir.map(|dir| {
            let file_appender = tracing_appender::rolling::daily(dir, "touchutils.log");
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(level)
        });

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(std::io::stderr)
                    .without_time()
                    .with_filter(level),
            )
            .with(file_layer)
            .init();
    });
}
