//! Rejections surfaced by run operations.
//!
//! Every variant leaves the run exactly as it was; callers narrate the
//! rejection and keep playing.

/// Why a run operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("no run is in progress")]
    NoActiveRun,

    #[error("the run is over")]
    RunEnded,

    #[error("a door was already opened on this floor")]
    DoorAlreadyChosen,

    #[error("there is no door {0}")]
    NoSuchDoor(usize),

    #[error("open a door before moving on")]
    DoorNotChosen,

    #[error("you must leave the merchant before continuing to the next floor")]
    MerchantOpen,

    #[error("no merchant is here")]
    MerchantClosed,

    #[error("the merchant has no offer {0}")]
    NoSuchOffer(usize),

    #[error("not enough gold for {item}: costs {cost}, you have {gold}")]
    NotEnoughGold {
        item: &'static str,
        cost: u32,
        gold: u32,
    },

    #[error("inventory full")]
    InventoryFull,

    #[error("the fight is not over yet")]
    CombatInProgress,

    #[error("there is nothing to fight")]
    NoCombat,

    #[error("wait for the monster to act")]
    NotPlayerTurn,
}
