//! Rows yielded by the datasets and the pipeline's output record.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A device row.
///
/// The id is opaque and only used as a join key; the description is matched
/// case-insensitively against the device selector.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Device {
    /// Device identifier.
    pub id: String,
    /// Human-readable model name, such as `iPhone 5`.
    pub description: String,
}

impl Device {
    /// Construct a device row.
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}

/// An edge of the many-to-many tester/device relation.
///
/// The dataset may repeat an edge; repeated tester ids are collapsed by the
/// linker stage.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceTesterLink {
    /// Tester on one end of the edge.
    pub tester_id: String,
    /// Device on the other end.
    pub device_id: String,
}

impl DeviceTesterLink {
    /// Construct a link row.
    pub fn new(tester_id: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            tester_id: tester_id.into(),
            device_id: device_id.into(),
        }
    }
}

/// A tester identity row.
///
/// # Examples
///
/// ```
/// use bugrank_core::TesterRecord;
///
/// let tester = TesterRecord::new("1", "Ann", "Lee", "US");
/// assert_eq!(tester.display_name(), "Ann Lee");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TesterRecord {
    /// Tester identifier.
    pub tester_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Country code, matched case-insensitively.
    pub country: String,
}

impl TesterRecord {
    /// Construct a tester row.
    pub fn new(
        tester_id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            tester_id: tester_id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            country: country.into(),
        }
    }

    /// First and last name joined by a single space.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A bug report row.
///
/// Only `tester_id` feeds the experience score. The bug and device ids are
/// carried verbatim so stores can be copied without loss.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BugReport {
    /// Bug identifier (not interpreted).
    pub bug_id: String,
    /// Device the bug was found on (not interpreted).
    pub device_id: String,
    /// Tester who filed the bug.
    pub tester_id: String,
}

impl BugReport {
    /// Construct a bug row.
    pub fn new(
        bug_id: impl Into<String>,
        device_id: impl Into<String>,
        tester_id: impl Into<String>,
    ) -> Self {
        Self {
            bug_id: bug_id.into(),
            device_id: device_id.into(),
            tester_id: tester_id.into(),
        }
    }
}

/// A ranked tester: display name and experience score.
///
/// Displayed as `Name=> score`.
///
/// # Examples
///
/// ```
/// use bugrank_core::TesterResult;
///
/// let result = TesterResult::new("4", "Ann Lee", 12);
/// assert_eq!(result.to_string(), "Ann Lee=> 12");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TesterResult {
    /// Tester identifier; breaks ties between equal scores.
    pub tester_id: String,
    /// `first_name last_name`.
    pub display_name: String,
    /// Number of bug reports filed by the tester.
    pub experience_score: u64,
}

impl TesterResult {
    /// Construct a result row.
    pub fn new(
        tester_id: impl Into<String>,
        display_name: impl Into<String>,
        experience_score: u64,
    ) -> Self {
        Self {
            tester_id: tester_id.into(),
            display_name: display_name.into(),
            experience_score,
        }
    }
}

impl fmt::Display for TesterResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=> {}", self.display_name, self.experience_score)
    }
}
