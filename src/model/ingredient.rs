use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Toppings a burger can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ingredient {
    Sauce,
    Cheese,
    Ham,
    Egg,
    Bacon,
}

impl Ingredient {
    /// Fixed order in which random selections are drawn.
    pub const MENU: [Ingredient; 5] = [
        Ingredient::Cheese,
        Ingredient::Bacon,
        Ingredient::Sauce,
        Ingredient::Egg,
        Ingredient::Ham,
    ];

    pub fn cost(self) -> f64 {
        match self {
            Ingredient::Sauce => 5.0,
            Ingredient::Cheese => 10.0,
            Ingredient::Ham => 12.0,
            Ingredient::Egg => 13.0,
            Ingredient::Bacon => 15.0,
        }
    }

    /// Takes the first 1..=5 entries of [`Ingredient::MENU`].
    pub fn random_selection<R: Rng + ?Sized>(rng: &mut R) -> Vec<Ingredient> {
        let count = rng.gen_range(1..=Self::MENU.len());
        Self::MENU[..count].to_vec()
    }

    /// Base cost plus the cost of every ingredient.
    pub fn total_cost(ingredients: &[Ingredient], base: u32) -> f64 {
        ingredients
            .iter()
            .fold(f64::from(base), |total, ingredient| total + ingredient.cost())
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Ingredient::Sauce => "SAUCE",
            Ingredient::Cheese => "CHEESE",
            Ingredient::Ham => "HAM",
            Ingredient::Egg => "EGG",
            Ingredient::Bacon => "BACON",
        };
        f.write_str(name)
    }
}
