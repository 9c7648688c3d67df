use std::fmt;

/// The four datasets the pipeline reads.
///
/// Each dataset has a fixed column layout; [`Dataset::min_fields`] is the
/// number of fields a row must carry for the columns the pipeline indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dataset {
    /// `deviceId, description`.
    Devices,
    /// `testerId, deviceId`.
    TesterDevice,
    /// `testerId, firstName, lastName, country`.
    Testers,
    /// `bugId, deviceId, testerId`; only the tester id is interpreted.
    Bugs,
}

impl Dataset {
    /// Every dataset, in pipeline order.
    pub const ALL: [Self; 4] = [Self::Devices, Self::TesterDevice, Self::Testers, Self::Bugs];

    /// Short name used in logs, errors and table names.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Devices => "devices",
            Self::TesterDevice => "tester_device",
            Self::Testers => "testers",
            Self::Bugs => "bugs",
        }
    }

    /// Minimum number of fields a data row must contain.
    ///
    /// # Examples
    ///
    /// ```
    /// use bugrank_core::Dataset;
    ///
    /// assert_eq!(Dataset::Testers.min_fields(), 4);
    /// assert_eq!(Dataset::Bugs.min_fields(), 3);
    /// ```
    #[must_use]
    pub const fn min_fields(self) -> usize {
        match self {
            Self::Devices | Self::TesterDevice => 2,
            Self::Testers => 4,
            Self::Bugs => 3,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
