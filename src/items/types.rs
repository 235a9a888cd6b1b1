/// What a consumable does when used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEffect {
    /// Restores HP, clamped to max HP.
    Heal(u32),
    /// Hits the current monster. Combat only.
    Damage(u32),
    /// Adds power for a number of player turns. Combat only.
    Buff { power: u32, turns: u32 },
    /// Halves incoming monster hits while active. Combat only.
    Shield { turns: u32 },
}

impl ItemEffect {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ItemEffect::Heal(_) => "heal",
            ItemEffect::Damage(_) => "damage",
            ItemEffect::Buff { .. } => "buff",
            ItemEffect::Shield { .. } => "shield",
        }
    }

    pub fn value(&self) -> u32 {
        match *self {
            ItemEffect::Heal(v) | ItemEffect::Damage(v) => v,
            ItemEffect::Buff { power, .. } => power,
            ItemEffect::Shield { .. } => 0,
        }
    }

    /// Duration in combat turns, present only for buffs and shields.
    pub fn duration(&self) -> Option<u32> {
        match *self {
            ItemEffect::Buff { turns, .. } | ItemEffect::Shield { turns } => Some(turns),
            ItemEffect::Heal(_) | ItemEffect::Damage(_) => None,
        }
    }
}

/// A consumable that occupies an inventory slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub name: &'static str,
    pub effect: ItemEffect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weapon {
    pub name: &'static str,
    pub power: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Armor {
    pub name: &'static str,
    pub hp_bonus: u32,
}

/// Equippable gear. Never stored in the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GearPiece {
    Weapon(Weapon),
    Armor(Armor),
}

/// What a merchant hands over for a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goods {
    Consumable(Item),
    Gear(GearPiece),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MerchantOffer {
    pub goods: Goods,
    pub cost: u32,
}

impl MerchantOffer {
    pub fn name(&self) -> &'static str {
        match self.goods {
            Goods::Consumable(item) => item.name,
            Goods::Gear(GearPiece::Weapon(w)) => w.name,
            Goods::Gear(GearPiece::Armor(a)) => a.name,
        }
    }

    pub fn needs_slot(&self) -> bool {
        matches!(self.goods, Goods::Consumable(_))
    }
}

/// Which stock a merchant carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MerchantKind {
    Standard,
    /// Boss-floor stock.
    Special,
}
