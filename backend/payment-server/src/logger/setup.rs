//! Setup logging subsystem.

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter, Layer, Registry,
};

use super::config;

/// Crates of this workspace, logged at the configured level rather than the default one.
const WORKSPACE_CRATES: [&str; 8] = [
    "ucs_common_enums",
    "ucs_common_utils",
    "domain_types",
    "interfaces",
    "shared_metrics",
    "external_services",
    "connector_integration",
    "payment_server",
];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Contains guards necessary for logging
#[derive(Debug)]
pub struct TelemetryGuard {
    _log_guards: Vec<WorkerGuard>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("Failed to create the log file appender: {0}")]
    FileAppender(#[from] InitError),
    #[error("Failed to install the global subscriber: {0}")]
    SubscriberInit(#[from] TryInitError),
}

/// Setup logging sub-system specifying the logging configuration, service (binary) name, and a
/// list of external crates for which a more verbose logging must be enabled. All crates within the
/// current cargo workspace are automatically considered for verbose logging.
pub fn setup(
    config: &config::Log,
    service_name: &str,
    crates_to_filter: impl AsRef<[&'static str]>,
) -> Result<TelemetryGuard, LoggerError> {
    let mut guards = Vec::new();
    let mut subscriber_layers: Vec<BoxedLayer> = Vec::new();

    if config.console.enabled {
        let console_filter_directive =
            config
                .console
                .filtering_directive
                .clone()
                .unwrap_or_else(|| {
                    get_envfilter_directive(
                        tracing::Level::WARN,
                        config.console.level.into_level(),
                        crates_to_filter.as_ref(),
                    )
                });

        let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        guards.push(guard);

        let filter = build_filter(config.console.level, console_filter_directive);
        let layer: BoxedLayer = match config.console.log_format {
            config::LogFormat::Default => tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_filter(filter)
                .boxed(),
            config::LogFormat::Json => {
                // Disable color or emphasis related ANSI escape codes for JSON formats
                error_stack::Report::set_color_mode(error_stack::fmt::ColorMode::None);

                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(writer)
                    .with_filter(filter)
                    .boxed()
            }
        };
        subscriber_layers.push(layer);
    }

    if let Some(file_config) = config.file.as_ref().filter(|file| file.enabled) {
        let file_filter_directive = file_config.filtering_directive.clone().unwrap_or_else(|| {
            get_envfilter_directive(
                tracing::Level::WARN,
                file_config.level.into_level(),
                crates_to_filter.as_ref(),
            )
        });

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(&file_config.file_name)
            .build(&file_config.path)?;
        let (writer, guard) = tracing_appender::non_blocking(appender);
        guards.push(guard);

        subscriber_layers.push(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(build_filter(file_config.level, file_filter_directive))
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(subscriber_layers)
        .try_init()?;

    tracing::info!(
        service_name,
        build_version = crate::version!(),
        "Logging subsystem initialized"
    );

    // Returning the TelemetryGuard for logs to be printed until it is dropped
    Ok(TelemetryGuard {
        _log_guards: guards,
    })
}

fn build_filter(level: config::Level, directive: String) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into_level().into())
        .parse_lossy(directive)
}

fn get_envfilter_directive(
    default_log_level: tracing::Level,
    filter_log_level: tracing::Level,
    crates_to_filter: impl AsRef<[&'static str]>,
) -> String {
    let mut explicitly_handled_targets = WORKSPACE_CRATES.to_vec();
    explicitly_handled_targets.extend(crates_to_filter.as_ref());
    explicitly_handled_targets.sort_unstable();
    explicitly_handled_targets.dedup();

    // +1 for the default log level added as a directive
    let num_directives = explicitly_handled_targets.len() + 1;

    explicitly_handled_targets
        .into_iter()
        .map(|crate_name| crate_name.replace('-', "_"))
        .zip(std::iter::repeat(filter_log_level))
        .fold(
            {
                let mut directives = Vec::with_capacity(num_directives);
                directives.push(default_log_level.to_string());
                directives
            },
            |mut directives, (target, level)| {
                directives.push(format!("{target}={level}"));
                directives
            },
        )
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_raises_workspace_and_listed_crates() {
        let directive = get_envfilter_directive(
            tracing::Level::WARN,
            tracing::Level::DEBUG,
            ["tower-http", "payment_server"],
        );

        let parts: Vec<&str> = directive.split(',').collect();
        assert_eq!(parts.first(), Some(&"WARN"));
        assert!(parts.contains(&"connector_integration=DEBUG"));
        assert!(parts.contains(&"tower_http=DEBUG"));
        assert_eq!(
            parts
                .iter()
                .filter(|part| **part == "payment_server=DEBUG")
                .count(),
            1
        );
    }
}
