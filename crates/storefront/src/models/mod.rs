//! Domain models for the storefront.
//!
//! Row-backed structs derive [`sqlx::FromRow`] and map one-to-one onto the
//! relations in `migrations/`. Composite types (`CartLine`, `OrderDetail`)
//! are assembled by the repositories from joined reads.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{CartItem, CartLine};
pub use order::{Order, OrderDetail, OrderItem, OrderLine};
pub use product::{NewProduct, Product};
pub use user::User;
