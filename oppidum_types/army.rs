use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Deserialize, Serialize)]
pub enum Tribe {
    Norse,
    Frankish,
    Saxon,
}

#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize)]
pub enum UnitRole {
    Infantry,
    Cavalry,
}

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Deserialize, Serialize)]
pub enum UnitName {
    // --- Norse ---
    Raider,
    Huscarl,
    Hirdman,
    // --- Frankish ---
    Milites,
    Arbalist,
    Paladin,
    // --- Saxon ---
    Fyrdman,
    Thegn,
    Marchrider,
}

impl UnitName {
    pub const ALL: [UnitName; 9] = [
        UnitName::Raider,
        UnitName::Huscarl,
        UnitName::Hirdman,
        UnitName::Milites,
        UnitName::Arbalist,
        UnitName::Paladin,
        UnitName::Fyrdman,
        UnitName::Thegn,
        UnitName::Marchrider,
    ];
}

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitName::Raider => "Raider",
            UnitName::Huscarl => "Huscarl",
            UnitName::Hirdman => "Hirdman",
            UnitName::Milites => "Milites",
            UnitName::Arbalist => "Arbalist",
            UnitName::Paladin => "Paladin",
            UnitName::Fyrdman => "Fyrdman",
            UnitName::Thegn => "Thegn",
            UnitName::Marchrider => "Marchrider",
        };

        f.write_str(name)
    }
}
