//! Player decision boundary.

use crate::items::{MerchantKind, MerchantOffer};
use async_trait::async_trait;
use std::collections::VecDeque;

/// Answers the questions a run asks the player.
///
/// Every call may take as long as it likes; the session waits on it without
/// polling. `None` means the question was cancelled or left unanswered and is
/// treated as the "do nothing" answer for that question.
#[async_trait(?Send)]
pub trait DecisionProvider {
    /// Role name typed by the player; unknown names fall back to Warrior.
    async fn choose_role(&mut self) -> Option<String>;

    /// `"hp"` or `"power"`; anything else declines the blessing.
    async fn shrine_choice(&mut self, floor: u32) -> Option<String>;

    /// Whether to risk the cursed room.
    async fn confirm_cursed(&mut self) -> Option<bool>;

    /// Inventory slot to use, as typed.
    async fn item_slot(&mut self) -> Option<String>;

    /// Offer index to buy, or `None` to leave the merchant.
    async fn merchant_choice(
        &mut self,
        kind: MerchantKind,
        offers: &[MerchantOffer],
        gold: u32,
    ) -> Option<usize>;

    /// Name for the leaderboard after a death. `None` or an empty name
    /// skips the save; anything else is stored as given.
    async fn player_name(&mut self, gold: u32) -> Option<String>;
}

/// Pre-recorded answers, handed out in order. Runs out into `None`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
    pub roles: VecDeque<String>,
    pub shrine: VecDeque<String>,
    pub cursed: VecDeque<bool>,
    pub slots: VecDeque<String>,
    pub purchases: VecDeque<Option<usize>>,
    pub names: VecDeque<String>,
}

impl ScriptedDecisions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.roles.push_back(role.to_string());
        self
    }

    pub fn with_shrine(mut self, choice: &str) -> Self {
        self.shrine.push_back(choice.to_string());
        self
    }

    pub fn with_cursed(mut self, accept: bool) -> Self {
        self.cursed.push_back(accept);
        self
    }

    pub fn with_slot(mut self, slot: &str) -> Self {
        self.slots.push_back(slot.to_string());
        self
    }

    /// Queue purchases for one merchant visit; a `None` ends the visit.
    pub fn with_purchases(mut self, picks: impl IntoIterator<Item = Option<usize>>) -> Self {
        self.purchases.extend(picks);
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.names.push_back(name.to_string());
        self
    }
}

#[async_trait(?Send)]
impl DecisionProvider for ScriptedDecisions {
    async fn choose_role(&mut self) -> Option<String> {
        self.roles.pop_front()
    }

    async fn shrine_choice(&mut self, _floor: u32) -> Option<String> {
        self.shrine.pop_front()
    }

    async fn confirm_cursed(&mut self) -> Option<bool> {
        self.cursed.pop_front()
    }

    async fn item_slot(&mut self) -> Option<String> {
        self.slots.pop_front()
    }

    async fn merchant_choice(
        &mut self,
        _kind: MerchantKind,
        _offers: &[MerchantOffer],
        _gold: u32,
    ) -> Option<usize> {
        self.purchases.pop_front().flatten()
    }

    async fn player_name(&mut self, _gold: u32) -> Option<String> {
        self.names.pop_front()
    }
}
