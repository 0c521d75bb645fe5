//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod brand;
pub mod cart;
pub mod cart_item;
pub mod customer_query;
pub mod listing;
pub mod order;
pub mod phone;
pub mod platform;
pub mod review;

// Re-export specific types to avoid conflicts
pub use brand::{Column as BrandColumn, Entity as Brand, Model as BrandModel};
pub use cart::{Column as CartColumn, Entity as Cart, Model as CartModel};
pub use cart_item::{Column as CartItemColumn, Entity as CartItem, Model as CartItemModel};
pub use customer_query::{
    Column as CustomerQueryColumn, Entity as CustomerQuery, Model as CustomerQueryModel,
};
pub use listing::{Column as ListingColumn, Entity as Listing, Model as ListingModel};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use phone::{Column as PhoneColumn, Entity as Phone, Model as PhoneModel};
pub use platform::{Column as PlatformColumn, Entity as Platform, Model as PlatformModel};
pub use review::{Column as ReviewColumn, Entity as Review, Model as ReviewModel};
