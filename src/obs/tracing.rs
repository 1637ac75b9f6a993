//! `esi_oauth2.flow` spans around the redirect, code exchange, and `/verify/` requests.
//!
//! Without the `tracing` feature every type here is zero-sized and futures pass through as-is.

// self
use crate::{_prelude::*, error::ErrorKind, obs::FlowKind};

/// Future returned by [`FlowSpan::instrument`].
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Future returned by [`FlowSpan::instrument`].
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// Span for one step of an SSO sign-in.
///
/// Carries `flow` (authorize, exchange_code, user_profile), the calling `stage`, and an
/// `error` field filled in with the [`ErrorKind`] when the step fails.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Opens the span for `kind`, started from `stage` (e.g. `complete`).
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		return Self {
			span: tracing::info_span!(
				"esi_oauth2.flow",
				flow = kind.as_str(),
				stage,
				error = tracing::field::Empty
			),
		};
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Fills the `error` field, e.g. `provider` for a rejected `/verify/` token.
	pub fn record_error(&self, kind: ErrorKind) {
		#[cfg(feature = "tracing")]
		self.span.record("error", kind.as_str());
		#[cfg(not(feature = "tracing"))]
		let _ = kind;
	}

	/// Keeps the span current until the guard drops. Used by the synchronous redirect step.
	pub fn entered(self) -> FlowSpanGuard {
		FlowSpanGuard {
			#[cfg(feature = "tracing")]
			_entered: self.span.entered(),
		}
	}

	/// Runs a token or profile request inside the span.
	pub fn instrument<Fut>(&self, request: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			tracing::Instrument::instrument(request, self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			request
		}
	}
}

/// Guard returned by [`FlowSpan::entered`].
pub struct FlowSpanGuard {
	#[cfg(feature = "tracing")]
	_entered: tracing::span::EnteredSpan,
}
impl Debug for FlowSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("FlowSpanGuard")
	}
}
