//! Merchant purchases and gear equipping.

use crate::core::error::ActionError;
use crate::core::run_state::RunState;
use crate::items::{merchant_stock, Armor, GearPiece, Goods, Item, MerchantKind, Weapon};

/// What a successful purchase did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purchase {
    Weapon { weapon: Weapon, cost: u32 },
    Armor { armor: Armor, cost: u32 },
    Stored { item: Item, slot: usize, cost: u32 },
}

/// Equips a weapon. Power becomes the weapon's power outright.
pub fn equip_weapon(state: &mut RunState, weapon: Weapon) {
    state.weapon = Some(weapon);
    state.power = weapon.power;
}

/// Equips armor, adding its bonus to max HP and current HP.
pub fn equip_armor(state: &mut RunState, armor: Armor) {
    state.armor = Some(armor);
    state.raise_max_hp(armor.hp_bonus);
}

/// Buys offer `index` from the given merchant's stock.
///
/// Checks run in order: offer exists, gold covers the cost, a consumable has
/// a free slot. Any failure leaves the run untouched. Gear skips the slot
/// check since it is equipped straight away.
pub fn purchase(
    state: &mut RunState,
    kind: MerchantKind,
    index: usize,
) -> Result<Purchase, ActionError> {
    let offer = *merchant_stock(kind)
        .get(index)
        .ok_or(ActionError::NoSuchOffer(index))?;

    if state.gold < offer.cost {
        return Err(ActionError::NotEnoughGold {
            item: offer.name(),
            cost: offer.cost,
            gold: state.gold,
        });
    }
    if offer.needs_slot() && state.inventory.is_full() {
        return Err(ActionError::InventoryFull);
    }

    state.gold -= offer.cost;
    let cost = offer.cost;
    let bought = match offer.goods {
        Goods::Gear(GearPiece::Weapon(weapon)) => {
            equip_weapon(state, weapon);
            Purchase::Weapon { weapon, cost }
        }
        Goods::Gear(GearPiece::Armor(armor)) => {
            equip_armor(state, armor);
            Purchase::Armor { armor, cost }
        }
        Goods::Consumable(item) => {
            let slot = state.inventory.insert(item)?;
            Purchase::Stored { item, slot, cost }
        }
    };
    tracing::debug!(?kind, index, ?bought, gold_left = state.gold, "purchase");
    Ok(bought)
}
