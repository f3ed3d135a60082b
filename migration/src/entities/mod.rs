pub mod click;
pub mod presave;
pub mod profile;
pub mod smart_link;

pub use click::Entity as ClickEntity;
pub use presave::Entity as PresaveEntity;
pub use profile::Entity as ProfileEntity;
pub use smart_link::Entity as SmartLinkEntity;
