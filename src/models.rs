pub mod appointment;
pub mod doctor_profile;
pub mod enums;
pub mod filters;
pub mod user;

pub use appointment::*;
pub use doctor_profile::*;
pub use enums::*;
pub use filters::*;
pub use user::*;
