use rand::Rng;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use super::{Comestible, Ingredient, ItemError};

#[derive(Debug, Clone, PartialEq)]
struct Recipe {
    display_id: String,
    ingredients: Vec<Ingredient>,
    cost: f64,
}

/// The reference order item: a single or double burger.
///
/// # Preparation
/// [`begin_preparation`](Comestible::begin_preparation) picks a random display id
/// (`burger_1` to `burger_8`) and a random prefix of [`Ingredient::MENU`], then prices the
/// burger at [`Burger::BASE_COST`] plus its ingredients. Everything is stored in once-cells,
/// so the recipe and the ticket can only be set once.
#[derive(Debug)]
pub struct Burger {
    double: bool,
    recipe: OnceLock<Recipe>,
    ready: AtomicBool,
    ticket: OnceLock<String>,
}

impl Burger {
    /// Price of a burger before toppings.
    pub const BASE_COST: u32 = 1500;

    /// Number of distinct burger pictures.
    pub const VARIANTS: u32 = 8;

    /// Creates a burger whose preparation has not started.
    pub fn new(double: bool) -> Self {
        Self {
            double,
            recipe: OnceLock::new(),
            ready: AtomicBool::new(false),
            ticket: OnceLock::new(),
        }
    }

    pub fn simple() -> Self {
        Self::new(false)
    }

    pub fn double() -> Self {
        Self::new(true)
    }

    /// Creates an already-started burger with a fixed recipe.
    pub fn with_recipe(
        double: bool,
        display_id: impl Into<String>,
        ingredients: Vec<Ingredient>,
    ) -> Self {
        let burger = Self::new(double);
        let cost = Ingredient::total_cost(&ingredients, Self::BASE_COST);
        let _ = burger.recipe.set(Recipe {
            display_id: display_id.into(),
            ingredients,
            cost,
        });
        burger
    }

    pub fn is_double(&self) -> bool {
        self.double
    }

    pub fn is_started(&self) -> bool {
        self.recipe.get().is_some()
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        self.recipe
            .get()
            .map(|recipe| recipe.ingredients.as_slice())
            .unwrap_or_default()
    }

    /// Total price, known once preparation has started.
    pub fn cost(&self) -> Option<f64> {
        self.recipe.get().map(|recipe| recipe.cost)
    }

    fn kind(&self) -> &'static str {
        if self.double {
            "Double"
        } else {
            "Simple"
        }
    }
}

impl Default for Burger {
    fn default() -> Self {
        Self::simple()
    }
}

impl Comestible for Burger {
    fn begin_preparation(&self) {
        self.recipe.get_or_init(|| {
            let mut rng = rand::thread_rng();
            let picture = rng.gen_range(1..=Self::VARIANTS);
            let ingredients = Ingredient::random_selection(&mut rng);
            let cost = Ingredient::total_cost(&ingredients, Self::BASE_COST);
            Recipe {
                display_id: format!("burger_{picture}"),
                ingredients,
                cost,
            }
        });
    }

    fn finalize_preparation(&self, cook: &str) -> Result<(), ItemError> {
        let recipe = self.recipe.get().ok_or(ItemError::NotStarted)?;
        self.ticket
            .get_or_init(|| format!("{}Total: {:.2}\nCook: {}", self, recipe.cost, cook));
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    fn display_id(&self) -> Result<&str, ItemError> {
        self.recipe
            .get()
            .map(|recipe| recipe.display_id.as_str())
            .ok_or(ItemError::NotStarted)
    }

    fn ticket(&self) -> Result<&str, ItemError> {
        self.ticket
            .get()
            .map(String::as_str)
            .ok_or(ItemError::NotFinalized)
    }
}

impl fmt::Display for Burger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Burger {}", self.kind())?;
        writeln!(f, "Ingredients:")?;
        for ingredient in self.ingredients() {
            writeln!(f, "{ingredient}")?;
        }
        Ok(())
    }
}
