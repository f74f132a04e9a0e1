pub mod invitation;
pub mod organization;
pub mod product;
pub mod user;

pub use invitation::Invitation;
pub use organization::Organization;
pub use product::{Product, ProductStatus};
pub use user::User;
