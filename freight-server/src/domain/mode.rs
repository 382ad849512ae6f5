//! Transport mode of a traversed leg.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a leg between two nodes is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Port to port by ship
    Sea,
    /// By aircraft (including long-haul port/airport mixes)
    Air,
    /// Same-city transfer between a port and an airport
    Intermodal,
}

impl TransportMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Sea => "sea",
            TransportMode::Air => "air",
            TransportMode::Intermodal => "intermodal",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
