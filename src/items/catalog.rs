//! Static item, gear and merchant tables.

use super::types::{Armor, GearPiece, Goods, Item, ItemEffect, MerchantKind, MerchantOffer, Weapon};

/// Consumables that drop from curses, bosses and pickups.
pub const BASE_ITEMS: [Item; 5] = [
    Item {
        name: "Health Potion",
        effect: ItemEffect::Heal(20),
    },
    Item {
        name: "One-Shot Gun",
        effect: ItemEffect::Damage(30),
    },
    Item {
        name: "Strength Elixir",
        effect: ItemEffect::Buff { power: 5, turns: 3 },
    },
    Item {
        name: "Shield Talisman",
        effect: ItemEffect::Shield { turns: 3 },
    },
    Item {
        name: "Fire Bomb",
        effect: ItemEffect::Damage(15),
    },
];

/// Reference weapon ladder. Nothing sells or drops these; merchants offer
/// Excalibur from `SPECIAL_MERCHANT_STOCK` instead.
pub const WEAPONS: [Weapon; 4] = [
    Weapon {
        name: "Rusty Sword",
        power: 2,
    },
    Weapon {
        name: "Steel Sword",
        power: 4,
    },
    Weapon {
        name: "Fire Blade",
        power: 6,
    },
    Weapon {
        name: "Dragon Slayer",
        power: 10,
    },
];

/// Reference armor ladder, unused like [`WEAPONS`]; the rare merchant sells
/// Dragon Armor.
pub const ARMORS: [Armor; 4] = [
    Armor {
        name: "Leather Armor",
        hp_bonus: 5,
    },
    Armor {
        name: "Chainmail",
        hp_bonus: 10,
    },
    Armor {
        name: "Plate Armor",
        hp_bonus: 15,
    },
    Armor {
        name: "Dragon Scale",
        hp_bonus: 25,
    },
];

pub const MERCHANT_STOCK: [MerchantOffer; 3] = [
    MerchantOffer {
        goods: Goods::Consumable(Item {
            name: "Mega Potion",
            effect: ItemEffect::Heal(50),
        }),
        cost: 40,
    },
    MerchantOffer {
        goods: Goods::Consumable(Item {
            name: "Thunder Gun",
            effect: ItemEffect::Damage(60),
        }),
        cost: 100,
    },
    MerchantOffer {
        goods: Goods::Consumable(Item {
            name: "Power Crystal",
            effect: ItemEffect::Buff { power: 8, turns: 5 },
        }),
        cost: 60,
    },
];

pub const SPECIAL_MERCHANT_STOCK: [MerchantOffer; 3] = [
    MerchantOffer {
        goods: Goods::Gear(GearPiece::Weapon(Weapon {
            name: "Excalibur",
            power: 10,
        })),
        cost: 180,
    },
    MerchantOffer {
        goods: Goods::Gear(GearPiece::Armor(Armor {
            name: "Dragon Armor",
            hp_bonus: 20,
        })),
        cost: 140,
    },
    MerchantOffer {
        goods: Goods::Consumable(Item {
            name: "Ultimate Potion",
            effect: ItemEffect::Heal(100),
        }),
        cost: 80,
    },
];

pub fn merchant_stock(kind: MerchantKind) -> &'static [MerchantOffer] {
    match kind {
        MerchantKind::Standard => &MERCHANT_STOCK,
        MerchantKind::Special => &SPECIAL_MERCHANT_STOCK,
    }
}
