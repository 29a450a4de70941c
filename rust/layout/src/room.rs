// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building archetypes, zone kinds and canonical room categories
//!
//! Zone names are display labels ("Patient Ward 2", "Bath 1"); every policy
//! lookup goes through the [`RoomType`] a name normalises to, never through
//! substring tests on the label.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Building archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Archetype {
    House,
    Hospital,
    Company,
    School,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [
        Archetype::House,
        Archetype::Hospital,
        Archetype::Company,
        Archetype::School,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::House => "HOUSE",
            Archetype::Hospital => "HOSPITAL",
            Archetype::Company => "COMPANY",
            Archetype::School => "SCHOOL",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HOUSE" => Ok(Archetype::House),
            "HOSPITAL" => Ok(Archetype::Hospital),
            "COMPANY" | "OFFICE" | "COMMERCIAL" => Ok(Archetype::Company),
            "SCHOOL" => Ok(Archetype::School),
            other => Err(Error::UnknownArchetype(other.to_string())),
        }
    }
}

/// Functional kind of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    Public,
    Service,
    Private,
    Circulation,
}

impl ZoneKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneKind::Public => "public",
            ZoneKind::Service => "service",
            ZoneKind::Private => "private",
            ZoneKind::Circulation => "circulation",
        }
    }
}

macro_rules! room_types {
    ($($variant:ident => $label:literal),+ $(,)?) => {
        /// Canonical room category
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum RoomType {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl RoomType {
            pub const ALL: &'static [RoomType] = &[$(RoomType::$variant),+];

            /// Display label, also the name of single-instance zones
            pub fn label(&self) -> &'static str {
                match self {
                    $(RoomType::$variant => $label,)+
                }
            }

            /// Exact label lookup
            pub fn from_label(label: &str) -> Option<RoomType> {
                match label {
                    $($label => Some(RoomType::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

room_types! {
    // House
    Entry => "Entry",
    Living => "Living",
    Dining => "Dining",
    Kitchen => "Kitchen",
    PantryFlex => "Pantry / Flex",
    FamilyLounge => "Family / Lounge",
    MasterBedroom => "Master Bedroom",
    Bedroom => "Bedroom",
    Study => "Study",
    Bath => "Bath",
    Utility => "Utility",
    // Hospital
    Reception => "Reception",
    Waiting => "Waiting",
    Consultation => "Consultation",
    PatientRoom => "Patient Room",
    Icu => "ICU",
    OperatingRoom => "Operating Room",
    Pharmacy => "Pharmacy",
    Lab => "Lab",
    Radiology => "Radiology",
    NursesStation => "Nurses Station",
    Admin => "Admin",
    // Company
    Lobby => "Lobby",
    OpenOffice => "Open Office",
    ManagerOffice => "Manager Office",
    MeetingRoom => "Meeting Room",
    Conference => "Conference",
    BreakRoom => "Break Room",
    ItRoom => "IT Room",
    PrintRoom => "Print Room",
    Storage => "Storage",
    ServerRoom => "Server Room",
    // School
    Classroom => "Classroom",
    ScienceLab => "Science Lab",
    ComputerLab => "Computer Lab",
    Library => "Library",
    Cafeteria => "Cafeteria",
    AdminOffice => "Admin Office",
    Gym => "Gym",
    ArtsRoom => "Arts Room",
    Auditorium => "Auditorium",
    // Common
    Bathroom => "Bathroom",
}

impl RoomType {
    /// Label used when several rooms of this type are grouped into one zone
    pub fn group_label(&self) -> Option<&'static str> {
        match self {
            RoomType::PatientRoom => Some("Patient Ward"),
            RoomType::Icu => Some("ICU Unit"),
            RoomType::OperatingRoom => Some("Operating Block"),
            RoomType::Classroom => Some("Classroom Wing"),
            RoomType::ScienceLab => Some("Science Lab Block"),
            _ => None,
        }
    }

    /// Bathrooms are never merged away
    pub fn is_bath_like(&self) -> bool {
        matches!(self, RoomType::Bath | RoomType::Bathroom)
    }

    /// Small ancillary rooms pushed toward the ends of their band
    pub fn is_utility(&self) -> bool {
        matches!(
            self,
            RoomType::Bath
                | RoomType::Bathroom
                | RoomType::Storage
                | RoomType::PrintRoom
                | RoomType::ServerRoom
                | RoomType::ItRoom
        )
    }

    /// Rooms that get the smaller window size
    pub fn is_compact_window(&self) -> bool {
        matches!(
            self,
            RoomType::Bedroom | RoomType::MasterBedroom | RoomType::Bath | RoomType::Bathroom
        )
    }

    /// Normalise a zone instance name to its room category
    ///
    /// Strips a trailing instance number, then resolves group labels
    /// ("Patient Ward 2" → Patient Room) before plain labels
    /// ("Bathroom 3" → Bathroom, "Bath 1" → Bath).
    pub fn from_instance_name(name: &str) -> Option<RoomType> {
        let stem = strip_instance_number(name.trim());
        RoomType::ALL
            .iter()
            .copied()
            .find(|t| t.group_label() == Some(stem))
            .or_else(|| RoomType::from_label(stem))
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// "Bedroom 2" → "Bedroom"; names without a numeric suffix are unchanged
fn strip_instance_number(name: &str) -> &str {
    match name.rsplit_once(' ') {
        Some((stem, suffix)) if !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()) => {
            stem
        }
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_names_normalise() {
        assert_eq!(
            RoomType::from_instance_name("Patient Ward 2"),
            Some(RoomType::PatientRoom)
        );
        assert_eq!(RoomType::from_instance_name("Bathroom 3"), Some(RoomType::Bathroom));
        assert_eq!(RoomType::from_instance_name("Bath 1"), Some(RoomType::Bath));
        assert_eq!(
            RoomType::from_instance_name("Science Lab Block 1"),
            Some(RoomType::ScienceLab)
        );
        assert_eq!(RoomType::from_instance_name("Science Lab"), Some(RoomType::ScienceLab));
        assert_eq!(RoomType::from_instance_name("Master Bedroom"), Some(RoomType::MasterBedroom));
        assert_eq!(RoomType::from_instance_name("Pantry / Flex"), Some(RoomType::PantryFlex));
        assert_eq!(RoomType::from_instance_name("Ballroom"), None);
    }

    #[test]
    fn test_bath_is_not_bathroom() {
        assert_ne!(RoomType::from_instance_name("Bath 2"), Some(RoomType::Bathroom));
        assert!(RoomType::Bath.is_bath_like());
        assert!(RoomType::Bathroom.is_bath_like());
        assert!(!RoomType::Bedroom.is_bath_like());
    }

    #[test]
    fn test_archetype_parse() {
        assert_eq!("house".parse::<Archetype>().unwrap(), Archetype::House);
        assert_eq!("School".parse::<Archetype>().unwrap(), Archetype::School);
        assert!("castle".parse::<Archetype>().is_err());
    }

    #[test]
    fn test_room_type_serde_uses_label() {
        let json = serde_json::to_string(&RoomType::PantryFlex).unwrap();
        assert_eq!(json, "\"Pantry / Flex\"");
        let back: RoomType = serde_json::from_str("\"Nurses Station\"").unwrap();
        assert_eq!(back, RoomType::NursesStation);
    }
}
