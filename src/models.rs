

pub mod campaigns;
pub mod donations;
pub mod stats;
pub mod user_profiles;
