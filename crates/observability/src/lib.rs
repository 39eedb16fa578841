//! parley observability: structured logging with optional OpenTelemetry export
//!
//! Console output goes to stderr so it never interleaves with a streamed
//! reply on stdout.
//!
//! # Quick Start
//!
//! ```no_run
//! use parley_observability::{init, ObservabilityConfig};
//!
//! let config = ObservabilityConfig::new("parley")
//!     .with_log_level("parley_runtime=debug")
//!     .with_otlp_endpoint("http://localhost:4317");
//!
//! init(config)?;
//! tracing::info!("ready");
//! # Ok::<(), parley_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_SERVICE_NAME` - Service name (default `parley`)
//! - `OTEL_SERVICE_VERSION` - Service version
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - OTLP endpoint; export is off when unset
//! - `PARLEY_LOG` or `RUST_LOG` - Log level filter (default `warn`)

pub mod config;
pub mod error;
pub mod telemetry;
pub mod spans;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use telemetry::{init, init_from_env, shutdown};
pub use spans::{record_duration, record_error};
