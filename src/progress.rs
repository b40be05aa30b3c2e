//! Callbacks a host can attach to long-running operations.
//!
//! Both traits are implemented for plain closures, so a host can pass
//! `&mut |fraction: f32| bar.set(fraction)` or `&mut |msg: &str| show(msg)`.

/// Receives the fraction of work done, in `[0, 1]`. Purely informational.
pub trait ProgressSink {
    fn report(&mut self, fraction: f32);
}

impl<F: FnMut(f32)> ProgressSink for F {
    fn report(&mut self, fraction: f32) {
        self(fraction)
    }
}

/// Receives user-facing warnings. Each distinct anomaly is reported at most
/// once per run.
pub trait DiagnosticSink {
    fn warn(&mut self, message: &str);
}

impl<F: FnMut(&str)> DiagnosticSink for F {
    fn warn(&mut self, message: &str) {
        self(message)
    }
}
