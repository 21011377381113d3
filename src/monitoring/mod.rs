/*!
 * Monitoring
 * Structured tracing setup for hosts embedding the registry
 */

mod tracer;

pub use tracer::{init_tracing, span_resolve};
