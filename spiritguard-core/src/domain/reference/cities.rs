// spiritguard-core/src/domain/reference/cities.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityLocation {
    pub coordinates: Coordinates,
    pub state: String,
}

// Keys are lower-case; several districts carry both their old and new names.
const BUILTIN_CITIES: &[(&str, f64, f64, &str)] = &[
    // Karnataka
    ("bangalore", 12.9716, 77.5946, "Karnataka"),
    ("bengaluru", 12.9716, 77.5946, "Karnataka"),
    ("bangalore urban", 12.9716, 77.5946, "Karnataka"),
    ("bangalore rural", 13.2847, 77.5712, "Karnataka"),
    ("mysore", 12.2958, 76.6394, "Karnataka"),
    ("mysuru", 12.2958, 76.6394, "Karnataka"),
    ("belgaum", 15.8497, 74.4977, "Karnataka"),
    ("belagavi", 15.8497, 74.4977, "Karnataka"),
    ("hubli", 15.3647, 75.1240, "Karnataka"),
    ("dharwad", 15.4589, 75.0078, "Karnataka"),
    ("mangalore", 12.9141, 74.8560, "Karnataka"),
    ("dakshina kannada", 12.9141, 74.8560, "Karnataka"),
    ("udupi", 13.3409, 74.7421, "Karnataka"),
    ("hassan", 13.0033, 76.1004, "Karnataka"),
    ("shivamogga", 13.9299, 75.5681, "Karnataka"),
    ("shimoga", 13.9299, 75.5681, "Karnataka"),
    ("tumkur", 13.3392, 77.1017, "Karnataka"),
    ("tumakuru", 13.3392, 77.1017, "Karnataka"),
    ("bellary", 15.1394, 76.9214, "Karnataka"),
    ("ballari", 15.1394, 76.9214, "Karnataka"),
    ("vijayapura", 16.8302, 75.7100, "Karnataka"),
    ("bijapur", 16.8302, 75.7100, "Karnataka"),
    ("kalaburagi", 17.3297, 76.8343, "Karnataka"),
    ("gulbarga", 17.3297, 76.8343, "Karnataka"),
    // Neighbouring states
    ("visakhapatnam", 17.6869, 83.2185, "Andhra Pradesh"),
    ("hyderabad", 17.3850, 78.4867, "Telangana"),
    ("pune", 18.5204, 73.8567, "Maharashtra"),
    ("mumbai", 19.0760, 72.8777, "Maharashtra"),
    ("chennai", 13.0827, 80.2707, "Tamil Nadu"),
];

/// District / city name -> coordinates and state.
#[derive(Debug, Clone, Default)]
pub struct CityDirectory {
    entries: BTreeMap<String, CityLocation>,
}

impl CityDirectory {
    pub fn builtin() -> Self {
        BUILTIN_CITIES
            .iter()
            .map(|&(name, lat, lon, state)| {
                (
                    name.to_string(),
                    CityLocation {
                        coordinates: Coordinates { lat, lon },
                        state: state.to_string(),
                    },
                )
            })
            .collect()
    }

    /// Case- and whitespace-insensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<&CityLocation> {
        self.entries.get(&name.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, CityLocation)> for CityDirectory {
    fn from_iter<I: IntoIterator<Item = (String, CityLocation)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, loc)| (name.trim().to_lowercase(), loc))
                .collect(),
        }
    }
}
