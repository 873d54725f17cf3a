//! Static offer catalog.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Whether an offer is a prize or a consolation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferCategory {
    Win,
    Lose,
}

impl OfferCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferCategory::Win => "win",
            OfferCategory::Lose => "lose",
        }
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub category: OfferCategory,
    pub symbol: String,
}

impl Offer {
    pub fn new(
        id: u32,
        title: &str,
        description: &str,
        category: OfferCategory,
        symbol: &str,
    ) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: description.to_string(),
            category,
            symbol: symbol.to_string(),
        }
    }

    pub fn is_win(&self) -> bool {
        self.category == OfferCategory::Win
    }
}

/// Immutable offer catalog, partitioned by category at construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    wins: Vec<Offer>,
    losses: Vec<Offer>,
}

impl Catalog {
    /// Build a catalog. Both categories must be non-empty and ids unique.
    pub fn new(offers: Vec<Offer>) -> Result<Self, CoreError> {
        let mut ids = std::collections::HashSet::new();
        for offer in &offers {
            if !ids.insert(offer.id) {
                return Err(CoreError::InvalidInput(format!(
                    "Duplicate offer id {}",
                    offer.id
                )));
            }
        }

        let (wins, losses): (Vec<_>, Vec<_>) = offers.into_iter().partition(Offer::is_win);
        if wins.is_empty() || losses.is_empty() {
            return Err(CoreError::InvalidInput(
                "Catalog needs at least one win and one lose offer".into(),
            ));
        }
        Ok(Self { wins, losses })
    }

    pub fn subset(&self, category: OfferCategory) -> &[Offer] {
        match category {
            OfferCategory::Win => &self.wins,
            OfferCategory::Lose => &self.losses,
        }
    }

    pub fn len(&self) -> usize {
        self.wins.len() + self.losses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find(&self, id: u32) -> Option<&Offer> {
        self.wins.iter().chain(self.losses.iter()).find(|o| o.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(default_offers()).expect("default catalog is well-formed")
    }
}

/// The shipped catalog: five prizes, three consolation messages.
pub fn default_offers() -> Vec<Offer> {
    use OfferCategory::{Lose, Win};
    vec![
        Offer::new(1, "Free Chocolate Waffle", "Enjoy a delicious chocolate waffle on us!", Win, "🧇"),
        Offer::new(2, "Free Pancake", "A fluffy pancake with your favorite toppings!", Win, "🥞"),
        Offer::new(3, "Free Cooler", "Beat the heat with a refreshing cooler!", Win, "🥤"),
        Offer::new(4, "Free Waffle Stick", "Crispy waffle stick just for you!", Win, "🧇"),
        Offer::new(5, "Free Cold Coffee", "Iced coffee to energize your day!", Win, "☕"),
        Offer::new(6, "Better luck Next Time", "Don't give up! Come back tomorrow for another chance!", Lose, "🍀"),
        Offer::new(7, "You'll get it next time", "Keep trying! Your perfect offer is waiting!", Lose, "🎯"),
        Offer::new(
            8,
            "It's okay, everyone experiences setbacks sometimes",
            "Tomorrow brings new opportunities!",
            Lose,
            "💪",
        ),
    ]
}
