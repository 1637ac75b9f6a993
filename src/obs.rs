//! Optional observability helpers for strategy flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `esi_oauth2.flow` with the `flow` and
//!   `stage` (call site) fields.
//! - Enable `metrics` to increment the `esi_oauth2_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`, and the
//!   `esi_oauth2_flow_errors_total` counter labeled by `flow` + `error` kind.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Flow kinds observed by the strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Building the authorization redirect.
	Authorize,
	/// Authorization-code exchange at the token endpoint.
	ExchangeCode,
	/// Profile fetch from the verification endpoint.
	UserProfile,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Authorize => "authorize",
			FlowKind::ExchangeCode => "exchange_code",
			FlowKind::UserProfile => "user_profile",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a flow helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Records the terminal outcome of a flow result on the span and the metrics recorder.
pub fn record_result<T>(span: &FlowSpan, kind: FlowKind, result: &Result<T>) {
	match result {
		Ok(_) => record_flow_outcome(kind, FlowOutcome::Success),
		Err(err) => {
			span.record_error(err.kind());
			record_flow_outcome(kind, FlowOutcome::Failure);
			record_flow_error(kind, err.kind());
		},
	}
}
