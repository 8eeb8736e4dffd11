//! Selectable fighters and their signature specials

use serde::{Deserialize, Serialize};

use crate::renderer::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fighter {
    MikeTyson,
    MuhammadAli,
    EvanderHolyfield,
    RockyBalboa,
    SugarRayLeonard,
    GeorgeForeman,
}

/// Projectile a fighter throws with the special key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialKind {
    Lightning,
    Butterfly,
    HolyFire,
    Thunder,
    SugarRush,
    GrillSlam,
}

impl Fighter {
    pub const ALL: [Fighter; 6] = [
        Fighter::MikeTyson,
        Fighter::MuhammadAli,
        Fighter::EvanderHolyfield,
        Fighter::RockyBalboa,
        Fighter::SugarRayLeonard,
        Fighter::GeorgeForeman,
    ];

    /// Look up a fighter by its host-facing id (e.g. `"mike-tyson"`)
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.id() == id)
    }

    pub fn id(&self) -> &'static str {
        match self {
            Fighter::MikeTyson => "mike-tyson",
            Fighter::MuhammadAli => "muhammad-ali",
            Fighter::EvanderHolyfield => "evander-holyfield",
            Fighter::RockyBalboa => "rocky-balboa",
            Fighter::SugarRayLeonard => "sugar-ray-leonard",
            Fighter::GeorgeForeman => "george-foreman",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Fighter::MikeTyson => "Mike Tyson",
            Fighter::MuhammadAli => "Muhammad Ali",
            Fighter::EvanderHolyfield => "Evander Holyfield",
            Fighter::RockyBalboa => "Rocky Balboa",
            Fighter::SugarRayLeonard => "Sugar Ray Leonard",
            Fighter::GeorgeForeman => "George Foreman",
        }
    }

    /// Body color used for the stick figure
    pub fn color(&self) -> Color {
        match self {
            Fighter::MikeTyson => Color::hex(0x000000),
            Fighter::MuhammadAli => Color::hex(0xffd700),
            Fighter::EvanderHolyfield => Color::hex(0xff4444),
            Fighter::RockyBalboa => Color::hex(0x8b4513),
            Fighter::SugarRayLeonard => Color::hex(0xff69b4),
            Fighter::GeorgeForeman => Color::hex(0xcd853f),
        }
    }

    pub fn special(&self) -> SpecialKind {
        match self {
            Fighter::MikeTyson => SpecialKind::Lightning,
            Fighter::MuhammadAli => SpecialKind::Butterfly,
            Fighter::EvanderHolyfield => SpecialKind::HolyFire,
            Fighter::RockyBalboa => SpecialKind::Thunder,
            Fighter::SugarRayLeonard => SpecialKind::SugarRush,
            Fighter::GeorgeForeman => SpecialKind::GrillSlam,
        }
    }
}

impl SpecialKind {
    pub fn color(&self) -> Color {
        match self {
            SpecialKind::Lightning => Color::hex(0xffff00),
            SpecialKind::Butterfly => Color::hex(0xff69b4),
            SpecialKind::HolyFire => Color::hex(0xff4444),
            SpecialKind::Thunder => Color::hex(0x8b4513),
            SpecialKind::SugarRush => Color::hex(0xff1493),
            SpecialKind::GrillSlam => Color::hex(0xcd853f),
        }
    }

    /// Electric specials burst as lightning; everything else burns
    pub fn is_electric(&self) -> bool {
        matches!(self, SpecialKind::Lightning | SpecialKind::Thunder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for f in Fighter::ALL {
            assert_eq!(Fighter::from_id(f.id()), Some(f));
        }
        assert_eq!(Fighter::from_id("glass-joe"), None);
    }

    #[test]
    fn test_specials_are_distinct() {
        let mut seen: Vec<SpecialKind> = Vec::new();
        for f in Fighter::ALL {
            assert!(!seen.contains(&f.special()));
            seen.push(f.special());
        }
        assert!(Fighter::RockyBalboa.special().is_electric());
        assert!(!Fighter::GeorgeForeman.special().is_electric());
    }
}
