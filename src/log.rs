use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use crate::env::EnvConfig;

pub fn init(env_config: &EnvConfig) {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());

    let builder = if env_config.log_perf {
        builder.with_span_events(FmtSpan::CLOSE)
    } else {
        builder
    };

    if env_config.log_json {
        builder.json().init();
    } else {
        builder.init();
    };
}
