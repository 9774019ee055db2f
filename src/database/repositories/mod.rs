pub mod measurements;
pub mod systems;
pub mod users;

pub use measurements::MeasurementRepository;
pub use systems::SystemRepository;
pub use users::UserRepository;
