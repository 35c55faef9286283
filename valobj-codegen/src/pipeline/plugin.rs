//! Pipeline plugin trait for extensibility.

use std::sync::Arc;

use eyre::Result;

use super::CompilationContext;

/// A plugin that can hook into the compilation pipeline.
///
/// Plugins receive callbacks before and after each phase runs. The pipeline
/// may run many declarations in parallel, so plugins must be `Send + Sync`
/// and guard any state they keep.
///
/// # Example
///
/// ```ignore
/// struct CountingPlugin {
///     accepted: AtomicUsize,
/// }
///
/// impl Plugin for CountingPlugin {
///     fn name(&self) -> &'static str { "counting" }
///
///     fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
///         if phase == "plan" && ctx.plan.is_some() {
///             self.accepted.fetch_add(1, Ordering::Relaxed);
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// The name of this plugin (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Called before a phase runs.
    ///
    /// # Errors
    ///
    /// Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes successfully.
    ///
    /// # Errors
    ///
    /// Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }
}

/// Shared plugins, so the caller can keep a handle after handing one to a pipeline.
impl<P: Plugin + ?Sized> Plugin for Arc<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        (**self).on_before_phase(phase, ctx)
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        (**self).on_after_phase(phase, ctx)
    }
}
