//! Order items: the [`Comestible`] contract and the reference [`Burger`].

pub mod burger;
pub mod comestible;
pub mod error;
pub mod ingredient;

pub use burger::*;
pub use comestible::*;
pub use error::*;
pub use ingredient::*;
