use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events reach the JSON log.
const LOG_TARGETS: [&str; 3] = ["sill", "sill_core", "sill_config"];

/// Initialize JSON logging on stderr.
///
/// When `quiet` is true only errors from the sill crates are emitted,
/// otherwise info and above. `RUST_LOG` still applies to everything else.
pub fn init_logging(quiet: bool) {
    let filter = filter_directives(quiet)
        .iter()
        .fold(EnvFilter::from_default_env(), |filter, directive| {
            filter.add_directive(directive.parse().expect("Invalid log directive"))
        });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .init();
}

fn filter_directives(quiet: bool) -> Vec<String> {
    let level = if quiet { "error" } else { "info" };
    LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::Directive;

    #[test]
    fn test_filter_directives_name_each_crate() {
        assert_eq!(
            filter_directives(true),
            vec!["sill=error", "sill_core=error", "sill_config=error"]
        );
        assert_eq!(
            filter_directives(false),
            vec!["sill=info", "sill_core=info", "sill_config=info"]
        );
    }

    #[test]
    fn test_filter_directives_parse() {
        for quiet in [true, false] {
            for directive in filter_directives(quiet) {
                assert!(directive.parse::<Directive>().is_ok(), "{}", directive);
            }
        }
    }
}
