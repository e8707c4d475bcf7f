/// Opaque handle for a timer registered with the host's [`Scheduler`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TimerId(pub u64);

/// Host-owned timer facility.
///
/// The engine never spins its own threads or sleeps: it registers timeouts
/// and intervals here and the host calls [`Tour::on_timer`] when one fires.
/// Clearing an id that already fired (or was never issued) is a no-op.
///
/// [`Tour::on_timer`]: crate::sequencer::Tour::on_timer
pub trait Scheduler {
    /// Registers a one-shot timer. The id must not be reused for a later
    /// registration while the engine is alive.
    fn set_timeout(&mut self, delay_ms: u64) -> TimerId;

    /// Registers a repeating timer firing every `period_ms`.
    fn set_interval(&mut self, period_ms: u64) -> TimerId;

    /// Cancels a pending timeout or interval.
    fn clear(&mut self, id: TimerId);
}
