

pub mod campaign;
pub mod donation;
pub mod profile;

pub mod exports{
    pub use super::campaign::get_campaigns;
    pub use super::donation::get_stats;
    pub use super::donation::record_donation;
    pub use super::donation::user_donations;
    pub use super::profile::check_permission;
    pub use super::profile::update_sub_account;
}
