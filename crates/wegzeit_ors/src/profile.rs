use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Routing profile segment of the ORS endpoint paths.
#[derive(Deserialize, Serialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OrsProfile {
    DrivingCar,
    DrivingHgv,
    CyclingRegular,
    FootWalking,
}

impl Display for OrsProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                OrsProfile::DrivingCar => "driving-car",
                OrsProfile::DrivingHgv => "driving-hgv",
                OrsProfile::CyclingRegular => "cycling-regular",
                OrsProfile::FootWalking => "foot-walking",
            }
        )
    }
}

impl FromStr for OrsProfile {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "driving-car" => Ok(OrsProfile::DrivingCar),
            "driving-hgv" => Ok(OrsProfile::DrivingHgv),
            "cycling-regular" => Ok(OrsProfile::CyclingRegular),
            "foot-walking" => Ok(OrsProfile::FootWalking),
            other => Err(format!(
                "unknown profile '{other}', expected one of driving-car, driving-hgv, cycling-regular, foot-walking"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_kebab_case() {
        assert_eq!(OrsProfile::DrivingCar.to_string(), "driving-car");
        assert_eq!(OrsProfile::FootWalking.to_string(), "foot-walking");
    }

    #[test]
    fn from_str_round_trips_display() {
        for profile in [
            OrsProfile::DrivingCar,
            OrsProfile::DrivingHgv,
            OrsProfile::CyclingRegular,
            OrsProfile::FootWalking,
        ] {
            assert_eq!(profile.to_string().parse::<OrsProfile>(), Ok(profile));
        }
    }

    #[test]
    fn from_str_rejects_unknown_profiles() {
        assert!("driving_car".parse::<OrsProfile>().is_err());
        assert!("".parse::<OrsProfile>().is_err());
    }
}
