// self
use crate::{
	error::ErrorKind,
	obs::{FlowKind, FlowOutcome},
};

/// Records a flow outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"esi_oauth2_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records the error category of a failed flow (when enabled).
pub fn record_flow_error(kind: FlowKind, error: ErrorKind) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"esi_oauth2_flow_errors_total",
			"flow" => kind.as_str(),
			"error" => error.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, error);
	}
}
