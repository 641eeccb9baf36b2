//! Working fluids and secondary media.

use crate::error::FluidError;

/// Pure fluids used in the refrigerant cycle and the secondary water loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// Water (secondary loops)
    Water,
    /// Refrigerant R134a
    R134a,
    /// Refrigerant R1234yf
    R1234yf,
    /// Refrigerant R32
    R32,
    /// Refrigerant R152a
    R152a,
    /// Refrigerant R245fa
    R245fa,
    /// Propane (R290)
    Propane,
    /// Isobutane (R600a)
    Isobutane,
    /// Ammonia (R717)
    Ammonia,
    /// Carbon dioxide (R744)
    CO2,
}

impl Species {
    pub const ALL: [Species; 10] = [
        Species::Water,
        Species::R134a,
        Species::R1234yf,
        Species::R32,
        Species::R152a,
        Species::R245fa,
        Species::Propane,
        Species::Isobutane,
        Species::Ammonia,
        Species::CO2,
    ];

    /// Canonical key used in configuration and state files.
    pub fn key(&self) -> &'static str {
        match self {
            Species::Water => "water",
            Species::R134a => "R134a",
            Species::R1234yf => "R1234yf",
            Species::R32 => "R32",
            Species::R152a => "R152a",
            Species::R245fa => "R245fa",
            Species::Propane => "R290",
            Species::Isobutane => "R600a",
            Species::Ammonia => "R717",
            Species::CO2 => "R744",
        }
    }

    /// Get CoolProp fluid name for this species.
    pub fn coolprop_name(&self) -> &'static str {
        match self {
            Species::Water => "Water",
            Species::R134a => "R134a",
            Species::R1234yf => "R1234yf",
            Species::R32 => "R32",
            Species::R152a => "R152a",
            Species::R245fa => "R245fa",
            Species::Propane => "n-Propane",
            Species::Isobutane => "IsoButane",
            Species::Ammonia => "Ammonia",
            Species::CO2 => "CarbonDioxide",
        }
    }

    /// Map to rfluids Pure enum (internal use for CoolProp backend).
    pub(crate) fn rfluids_pure(&self) -> rfluids::substance::Pure {
        use rfluids::substance::Pure;
        match self {
            Species::Water => Pure::Water,
            Species::R134a => Pure::R134a,
            Species::R1234yf => Pure::R1234yf,
            Species::R32 => Pure::R32,
            Species::R152a => Pure::R152a,
            Species::R245fa => Pure::R245fa,
            Species::Propane => Pure::nPropane,
            Species::Isobutane => Pure::Isobutane,
            Species::Ammonia => Pure::Ammonia,
            Species::CO2 => Pure::CarbonDioxide,
        }
    }

    /// Get human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Species::Water => "Water",
            Species::R134a => "R134a",
            Species::R1234yf => "R1234yf",
            Species::R32 => "R32",
            Species::R152a => "R152a",
            Species::R245fa => "R245fa",
            Species::Propane => "Propane (R290)",
            Species::Isobutane => "Isobutane (R600a)",
            Species::Ammonia => "Ammonia (R717)",
            Species::CO2 => "Carbon Dioxide (R744)",
        }
    }

    /// Whether the species can serve as the working fluid of the refrigerant cycle.
    pub fn is_refrigerant(&self) -> bool {
        !matches!(self, Species::Water)
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Species {
    type Err = FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "WATER" | "H2O" => Ok(Species::Water),
            "R134A" => Ok(Species::R134a),
            "R1234YF" => Ok(Species::R1234yf),
            "R32" => Ok(Species::R32),
            "R152A" => Ok(Species::R152a),
            "R245FA" => Ok(Species::R245fa),
            "R290" | "PROPANE" | "N-PROPANE" => Ok(Species::Propane),
            "R600A" | "ISOBUTANE" => Ok(Species::Isobutane),
            "R717" | "NH3" | "AMMONIA" => Ok(Species::Ammonia),
            "R744" | "CO2" | "CARBONDIOXIDE" => Ok(Species::CO2),
            _ => Err(FluidError::UnknownFluid {
                name: s.trim().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_aliases() {
        assert_eq!("water".parse::<Species>().unwrap(), Species::Water);
        assert_eq!("H2O".parse::<Species>().unwrap(), Species::Water);
        assert_eq!("r134a".parse::<Species>().unwrap(), Species::R134a);
        assert_eq!("NH3".parse::<Species>().unwrap(), Species::Ammonia);
        assert_eq!(" propane ".parse::<Species>().unwrap(), Species::Propane);
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "unobtainium".parse::<Species>().unwrap_err();
        assert!(matches!(err, FluidError::UnknownFluid { .. }));
    }

    #[test]
    fn canonical_keys_roundtrip() {
        for species in Species::ALL {
            let parsed = species.key().parse::<Species>().unwrap();
            assert_eq!(parsed, species);
        }
    }

    #[test]
    fn only_water_is_not_a_refrigerant() {
        let refrigerants = Species::ALL.iter().filter(|s| s.is_refrigerant()).count();
        assert_eq!(refrigerants, Species::ALL.len() - 1);
        assert!(!Species::Water.is_refrigerant());
    }
}
