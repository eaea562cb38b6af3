use crate::game::error::UnknownName;
use std::fmt;

/// Declares a closed enum together with its symbolic-name and label tables.
///
/// The symbolic name is what goes into save files; the label is what the
/// player sees.
macro_rules! symbolic_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => ($symbol:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $symbol),+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn from_name(name: &str) -> Result<Self, UnknownName> {
                match name {
                    $($symbol => Ok($name::$variant),)+
                    _ => Err(UnknownName {
                        kind: $kind,
                        name: name.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

symbolic_enum! {
    StarType, "star type" {
        MainSequence => ("MAIN_SEQUENCE", "Main Sequence Star"),
        RedGiant => ("RED_GIANT", "Red Giant"),
        WhiteDwarf => ("WHITE_DWARF", "White Dwarf"),
        BlueGiant => ("BLUE_GIANT", "Blue Giant"),
    }
}

symbolic_enum! {
    PlanetType, "planet type" {
        Terrestrial => ("TERRESTRIAL", "Terrestrial"),
        GasGiant => ("GAS_GIANT", "Gas Giant"),
        IceWorld => ("ICE_WORLD", "Ice World"),
        Desert => ("DESERT", "Desert"),
        Volcanic => ("VOLCANIC", "Volcanic"),
        Oceanic => ("OCEANIC", "Oceanic"),
    }
}

symbolic_enum! {
    ResourceType, "resource type" {
        Minerals => ("MINERALS", "Minerals"),
        Crystals => ("CRYSTALS", "Crystals"),
        Gases => ("GASES", "Gases"),
        Organic => ("ORGANIC", "Organic Matter"),
        Energy => ("ENERGY", "Energy Source"),
        Water => ("WATER", "Water"),
        RareElements => ("RARE_ELEMENTS", "Rare Elements"),
    }
}

symbolic_enum! {
    /// Observable top-level state. Menu states are overlays on a base scene.
    GameState, "game state" {
        StartupMenu => ("STARTUP_MENU", "Startup Menu"),
        Galaxy => ("GALAXY", "Galaxy"),
        System => ("SYSTEM", "System"),
        Planet => ("PLANET", "Planet"),
        GalaxyMenu => ("GALAXY_MENU", "Galaxy Menu"),
        SystemMenu => ("SYSTEM_MENU", "System Menu"),
    }
}

impl GameState {
    pub fn is_menu(self) -> bool {
        matches!(
            self,
            GameState::StartupMenu | GameState::GalaxyMenu | GameState::SystemMenu
        )
    }
}
