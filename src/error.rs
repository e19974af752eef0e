use thiserror::Error;

/// Failures the simulation core can surface.
///
/// Everything else the model produces (starvation, dehydration, extreme
/// weather, old age) is a modeled outcome handled by the death step, never an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// A temperature lookup was asked about a month outside the calendar.
    #[error("month must be between 1 and 12, given: {0}")]
    MonthOutOfRange(u32),

    /// Breeding logic tried to impregnate a male. This is a defect in the
    /// caller, not a modeled event, so the run aborts.
    #[error("impregnated a male animal; breeding logic is mis-wired")]
    ImpregnatedMale,
}
