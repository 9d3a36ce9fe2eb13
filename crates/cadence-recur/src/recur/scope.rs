use cadence_core::Frequency;

/// ## Summary
/// The grouping a rule part interprets a batch within.
///
/// Depending on the frequency and the rule parts ahead of it, a part such as
/// by-day works on weeks, months, weeks clipped to a month, or whole years.
/// The stages themselves never branch on it; concrete parts do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Weekly,
    Monthly,
    WeeklyAndMonthly,
    Yearly,
}

impl Scope {
    /// ## Summary
    /// Resolves the scope for a rule with the given frequency.
    ///
    /// A weekly frequency or a BYWEEKNO part makes the scope weekly; a monthly
    /// frequency or a BYMONTH part makes it monthly; both together give
    /// [`Scope::WeeklyAndMonthly`]. Anything else is yearly.
    #[must_use]
    pub fn resolve(freq: Frequency, has_by_week_no: bool, has_by_month: bool) -> Self {
        let weekly = has_by_week_no || freq == Frequency::Weekly;
        let monthly = has_by_month || freq == Frequency::Monthly;
        match (weekly, monthly) {
            (true, true) => Self::WeeklyAndMonthly,
            (true, false) => Self::Weekly,
            (false, true) => Self::Monthly,
            (false, false) => Self::Yearly,
        }
    }

    /// Whether candidates are confined to their month.
    #[must_use]
    pub const fn is_monthly(self) -> bool {
        matches!(self, Self::Monthly | Self::WeeklyAndMonthly)
    }
}
