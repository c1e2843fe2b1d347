//! Pipeline instrumentation for feature extraction and pattern location.
//!
//! Spans:
//! - `find_pattern` around one scene/template location (`scene_rows`,
//!   `scene_cols`),
//! - `feature_index` around one feature extraction (`rows`, `cols`,
//!   `region`).
//!
//! Events: `keypoints_detected` (`count`), `matches_filtered` (`candidates`,
//! `accepted`) and `pattern_located` (the rectangle bounds).
//!
//! Everything is emitted at info level when the `tracing` feature is on. With
//! the feature off the span macro yields a [`NoopSpan`] and the event macro
//! only evaluates its field values.

#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}

#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
    ($name:expr) => {
        tracing::info!(name: $name)
    };
}

// field values are still evaluated
#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
    ($name:expr) => {};
}

pub(crate) use trace_event;
pub(crate) use trace_span;
