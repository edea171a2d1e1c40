//! Reward categories, unit rarities, and typed reward payloads.
//!
//! Payloads stay typed until they reach a [`crate::RewardTally`], where
//! [`RewardItem::key`] turns them into the storage key the host persists.

use serde::{Deserialize, Serialize};

/// The prize category picked by a sub-draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// A crafting material.
    Material,
    /// A stack of candy of one flavor.
    Candy,
    /// A stack of tickets.
    Ticket,
    /// Coins.
    Coin,
    /// A collectible unit with a rarity.
    Unit,
}

impl Category {
    /// All categories in weight-table order.
    pub const ALL: [Self; 5] = [
        Self::Material,
        Self::Candy,
        Self::Ticket,
        Self::Coin,
        Self::Unit,
    ];

    /// Position of this category in weight-table order.
    pub fn index(self) -> usize {
        match self {
            Self::Material => 0,
            Self::Candy => 1,
            Self::Ticket => 2,
            Self::Coin => 3,
            Self::Unit => 4,
        }
    }

    /// Lowercase name used in configuration and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Material => "material",
            Self::Candy => "candy",
            Self::Ticket => "ticket",
            Self::Coin => "coin",
            Self::Unit => "unit",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.name() == lower)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// Rarity of a unit reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    /// Most frequent rarity.
    Common,
    /// Second most frequent rarity.
    Uncommon,
    /// High rarity, suppressed as up-rate rises above neutral.
    Rare,
    /// Highest rarity, suppressed as up-rate rises above neutral.
    Legendary,
}

impl Rarity {
    /// All rarities in weight-table order.
    pub const ALL: [Self; 4] = [Self::Common, Self::Uncommon, Self::Rare, Self::Legendary];

    /// Position of this rarity in weight-table order.
    pub fn index(self) -> usize {
        match self {
            Self::Common => 0,
            Self::Uncommon => 1,
            Self::Rare => 2,
            Self::Legendary => 3,
        }
    }

    /// Lowercase name, also the prefix of unit tally keys.
    pub fn name(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Legendary => "legendary",
        }
    }

    /// Returns true for the rarities damped when up-rate drifts high.
    pub fn is_high(self) -> bool {
        matches!(self, Self::Rare | Self::Legendary)
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Rarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|r| r.name() == lower)
            .ok_or_else(|| format!("unknown rarity: {s}"))
    }
}

/// Candy flavor, drawn uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandyFlavor {
    /// Flavor A.
    A,
    /// Flavor B.
    B,
    /// Flavor C.
    C,
    /// Flavor D.
    D,
    /// Flavor E.
    E,
}

impl CandyFlavor {
    /// All flavors in draw order.
    pub const ALL: [Self; 5] = [Self::A, Self::B, Self::C, Self::D, Self::E];

    /// Position of this flavor in draw order.
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
            Self::E => 4,
        }
    }

    /// Single-letter tag used in tally keys.
    pub fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
        }
    }
}

/// A single generated reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RewardItem {
    /// One material with the given id.
    Material {
        /// Material id, starting at 1.
        id: u32,
    },
    /// A stack of candy.
    Candy {
        /// Flavor of the stack.
        flavor: CandyFlavor,
        /// Stack size.
        amount: u32,
    },
    /// Coins.
    Coin {
        /// Number of coins.
        amount: u32,
    },
    /// Tickets.
    Ticket {
        /// Number of tickets.
        amount: u32,
    },
    /// One unit of a rarity.
    Unit {
        /// Unit rarity.
        rarity: Rarity,
        /// Unit id within its rarity, starting at 1.
        id: u32,
    },
}

impl RewardItem {
    /// The category this item was generated for.
    pub fn category(&self) -> Category {
        match self {
            Self::Material { .. } => Category::Material,
            Self::Candy { .. } => Category::Candy,
            Self::Coin { .. } => Category::Coin,
            Self::Ticket { .. } => Category::Ticket,
            Self::Unit { .. } => Category::Unit,
        }
    }

    /// Canonical tally key, e.g. `material_7`, `candy_B`, `coins`, `rare_3`.
    pub fn key(&self) -> String {
        match self {
            Self::Material { id } => format!("material_{id}"),
            Self::Candy { flavor, .. } => format!("candy_{}", flavor.letter()),
            Self::Coin { .. } => "coins".to_string(),
            Self::Ticket { .. } => "tickets".to_string(),
            Self::Unit { rarity, id } => format!("{rarity}_{id}"),
        }
    }

    /// How much this item adds to its tally key.
    pub fn amount(&self) -> u64 {
        match self {
            Self::Material { .. } | Self::Unit { .. } => 1,
            Self::Candy { amount, .. } | Self::Coin { amount } | Self::Ticket { amount } => {
                u64::from(*amount)
            }
        }
    }
}

impl std::fmt::Display for RewardItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x{}", self.key(), self.amount())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_order_matches_index() {
        for (i, c) in Category::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
        for (i, r) in Rarity::ALL.iter().enumerate() {
            assert_eq!(r.index(), i);
        }
        for (i, f) in CandyFlavor::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
        }
    }

    #[test]
    fn parse_names() {
        assert_eq!("unit".parse::<Category>(), Ok(Category::Unit));
        assert_eq!(" Coin ".parse::<Category>(), Ok(Category::Coin));
        assert!("gem".parse::<Category>().is_err());
        assert_eq!("LEGENDARY".parse::<Rarity>(), Ok(Rarity::Legendary));
        assert!("mythic".parse::<Rarity>().is_err());
    }

    #[test]
    fn high_rarities() {
        assert!(!Rarity::Common.is_high());
        assert!(!Rarity::Uncommon.is_high());
        assert!(Rarity::Rare.is_high());
        assert!(Rarity::Legendary.is_high());
    }

    #[test]
    fn keys_are_canonical() {
        assert_eq!(RewardItem::Material { id: 7 }.key(), "material_7");
        assert_eq!(
            RewardItem::Candy {
                flavor: CandyFlavor::B,
                amount: 4
            }
            .key(),
            "candy_B"
        );
        assert_eq!(RewardItem::Coin { amount: 1 }.key(), "coins");
        assert_eq!(RewardItem::Ticket { amount: 9 }.key(), "tickets");
        assert_eq!(
            RewardItem::Unit {
                rarity: Rarity::Rare,
                id: 3
            }
            .key(),
            "rare_3"
        );
    }

    #[test]
    fn amounts() {
        assert_eq!(RewardItem::Material { id: 1 }.amount(), 1);
        assert_eq!(
            RewardItem::Candy {
                flavor: CandyFlavor::E,
                amount: 5
            }
            .amount(),
            5
        );
        assert_eq!(RewardItem::Ticket { amount: 12 }.amount(), 12);
        assert_eq!(
            RewardItem::Unit {
                rarity: Rarity::Common,
                id: 10
            }
            .amount(),
            1
        );
    }

    #[test]
    fn item_category() {
        assert_eq!(RewardItem::Coin { amount: 1 }.category(), Category::Coin);
        assert_eq!(
            RewardItem::Unit {
                rarity: Rarity::Legendary,
                id: 4
            }
            .category(),
            Category::Unit
        );
    }

    #[test]
    fn display() {
        assert_eq!(RewardItem::Ticket { amount: 3 }.to_string(), "tickets x3");
        assert_eq!(Rarity::Uncommon.to_string(), "uncommon");
        assert_eq!(Category::Material.to_string(), "material");
    }

    #[test]
    fn serde_tagged() {
        let item = RewardItem::Unit {
            rarity: Rarity::Rare,
            id: 2,
        };
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"kind":"unit","rarity":"rare","id":2}"#);
    }
}
