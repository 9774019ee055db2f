pub mod measurement;
pub mod system;
pub mod user;

pub use measurement::Measurement;
pub use system::HydroponicSystem;
pub use user::User;
