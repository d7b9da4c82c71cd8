

use bigdecimal::{BigDecimal, Zero};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use serde::{Serialize, Deserialize};
use crate::constants::*;
use crate::helpers::misc::{round_one_decimal, storage_error_resp};
use crate::schema::campaigns;
use crate::schema::donations;
use crate::schema::user_profiles;

/*
    platform wide counters for the dashboard, a flat object on the
    wire with the overall totals next to the auto spend specific
    ones so the client can render both without extra roundtrips
*/
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct PlatformStatsData{
    pub total_donated: String,
    pub total_donors: i64,
    pub active_campaigns: i64,
    pub total_donations: i64,
    pub sub_account_donations: i64,
    pub regular_donations: i64,
    pub sub_account_percentage: f64,
    pub recent_donations: i64, /* last 24 hours */
    pub recent_auto_donations: i64,
    pub users_with_sub: i64,
}

impl PlatformStatsData{

    pub async fn calculate(connection: &mut PooledConnection<ConnectionManager<PgConnection>>)
        -> Result<PlatformStatsData, PanelHttpResponse>{

        let total_donated = match donations::table
            .select(diesel::dsl::sum(donations::amount))
            .get_result::<Option<BigDecimal>>(connection)
            {
                Ok(sum) => sum.unwrap_or_else(BigDecimal::zero),
                Err(e) => return Err(storage_error_resp("PlatformStatsData::calculate", e).await),
            };

        let total_donors = match user_profiles::table
            .filter(user_profiles::total_donated.gt(BigDecimal::zero()))
            .count()
            .get_result::<i64>(connection)
            {
                Ok(count) => count,
                Err(e) => return Err(storage_error_resp("PlatformStatsData::calculate", e).await),
            };

        let active_campaigns = match campaigns::table
            .filter(campaigns::is_active.eq(true))
            .count()
            .get_result::<i64>(connection)
            {
                Ok(count) => count,
                Err(e) => return Err(storage_error_resp("PlatformStatsData::calculate", e).await),
            };

        let total_donations = match donations::table
            .count()
            .get_result::<i64>(connection)
            {
                Ok(count) => count,
                Err(e) => return Err(storage_error_resp("PlatformStatsData::calculate", e).await),
            };

        let sub_account_donations = match donations::table
            .filter(donations::used_spend_permission.eq(true))
            .count()
            .get_result::<i64>(connection)
            {
                Ok(count) => count,
                Err(e) => return Err(storage_error_resp("PlatformStatsData::calculate", e).await),
            };

        let sub_account_percentage = if total_donations > 0{
            round_one_decimal((sub_account_donations as f64 / total_donations as f64) * 100.0)
        } else{
            0.0
        };

        /* recent activity window */
        let yesterday = chrono::Local::now().naive_local() - chrono::Duration::days(1);

        let recent_donations = match donations::table
            .filter(donations::created_at.ge(yesterday))
            .count()
            .get_result::<i64>(connection)
            {
                Ok(count) => count,
                Err(e) => return Err(storage_error_resp("PlatformStatsData::calculate", e).await),
            };

        let recent_auto_donations = match donations::table
            .filter(donations::created_at.ge(yesterday))
            .filter(donations::used_spend_permission.eq(true))
            .count()
            .get_result::<i64>(connection)
            {
                Ok(count) => count,
                Err(e) => return Err(storage_error_resp("PlatformStatsData::calculate", e).await),
            };

        let users_with_sub = match user_profiles::table
            .filter(user_profiles::has_sub_account.eq(true))
            .count()
            .get_result::<i64>(connection)
            {
                Ok(count) => count,
                Err(e) => return Err(storage_error_resp("PlatformStatsData::calculate", e).await),
            };

        Ok(
            PlatformStatsData{
                total_donated: total_donated.to_string(),
                total_donors,
                active_campaigns,
                total_donations,
                sub_account_donations,
                regular_donations: total_donations - sub_account_donations,
                sub_account_percentage,
                recent_donations,
                recent_auto_donations,
                users_with_sub,
            }
        )

    }

}
