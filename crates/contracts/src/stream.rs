//! Stream identity and routing

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two replayed physiological streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    /// Fetal heart rate, beats per minute
    Bpm,
    /// Uterine activity
    Uterus,
}

impl StreamKind {
    pub const ALL: [StreamKind; 2] = [StreamKind::Bpm, StreamKind::Uterus];

    /// Route segment on the receiving service
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamKind::Bpm => "bpm",
            StreamKind::Uterus => "uterus",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
