pub mod analysis;
pub mod assessment;
pub mod profile;
