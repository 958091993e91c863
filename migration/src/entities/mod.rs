pub mod group;
pub mod user;

pub use group::Entity as GroupEntity;
pub use user::Entity as UserEntity;
