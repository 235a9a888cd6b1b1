use serde::{Deserialize, Serialize};

/// Starting bundle a run is created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleStats {
    pub hp: u32,
    pub power: u32,
    pub gold: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Warrior,
    Paladin,
    Rogue,
    Mage,
}

impl Role {
    pub fn all() -> [Role; 4] {
        [Role::Warrior, Role::Paladin, Role::Rogue, Role::Mage]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Role::Warrior => "Warrior",
            Role::Paladin => "Paladin",
            Role::Rogue => "Rogue",
            Role::Mage => "Mage",
        }
    }

    pub fn stats(&self) -> RoleStats {
        match self {
            Role::Warrior => RoleStats {
                hp: 30,
                power: 7,
                gold: 0,
            },
            Role::Paladin => RoleStats {
                hp: 40,
                power: 5,
                gold: 0,
            },
            Role::Rogue => RoleStats {
                hp: 25,
                power: 6,
                gold: 30,
            },
            Role::Mage => RoleStats {
                hp: 22,
                power: 8,
                gold: 10,
            },
        }
    }

    /// One-line pitch shown on the role prompt.
    pub fn blurb(&self) -> &'static str {
        match self {
            Role::Warrior => "Balanced bruiser. Higher starting strength for big early damage.",
            Role::Paladin => "Holy tank. Highest starting HP, very hard to kill.",
            Role::Rogue => "Sneaky looter. Starts with extra gold for early shopping.",
            Role::Mage => "Glass cannon. Highest starting power but low HP.",
        }
    }

    /// Case-insensitive lookup; empty or unknown input falls back to Warrior.
    pub fn parse_or_default(input: Option<&str>) -> Role {
        let Some(choice) = input.map(str::trim).filter(|s| !s.is_empty()) else {
            return Role::default();
        };
        Role::all()
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(choice))
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
