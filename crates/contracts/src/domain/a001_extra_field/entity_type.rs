use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity categories that can carry extra fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Spool,
    Filament,
    Vendor,
}

impl EntityType {
    /// Route / API code of the category
    pub fn code(&self) -> &'static str {
        match self {
            EntityType::Spool => "spool",
            EntityType::Filament => "filament",
            EntityType::Vendor => "vendor",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EntityType::Spool => "Spools",
            EntityType::Filament => "Filaments",
            EntityType::Vendor => "Vendors",
        }
    }

    pub fn all() -> Vec<EntityType> {
        vec![EntityType::Spool, EntityType::Filament, EntityType::Vendor]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "spool" => Some(EntityType::Spool),
            "filament" => Some(EntityType::Filament),
            "vendor" => Some(EntityType::Vendor),
            _ => None,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
