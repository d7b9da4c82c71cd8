

use actix_web::HttpResponse;
use bigdecimal::{BigDecimal, ToPrimitive, Zero};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use serde::{Serialize, Deserialize};
use crate::constants::*;
use crate::helpers::misc::{ErrorResponse, storage_error_resp};
use crate::schema::campaigns;
use crate::schema::donations;

/*

    diesel migration generate quickgive_tables ---> create migration sql files
    diesel migration run                       ---> apply sql files to db
    diesel migration redo                      ---> drop tables

*/

#[derive(Identifiable, Selectable, Queryable, Debug, Clone)]
#[diesel(table_name=campaigns)]
pub struct Campaign{ /* note that the ordering of fields must be the same as the table fields in up.sql */
    pub id: i32,
    pub title: String,
    pub description: String,
    pub recipient_address: String,
    pub goal_amount: BigDecimal,
    pub raised_amount: BigDecimal, /* must always equal the sum over this campaign's donation rows */
    pub category: String,
    pub emoji: String,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name=campaigns)]
pub struct NewCampaign{
    pub title: String,
    pub description: String,
    pub recipient_address: String,
    pub goal_amount: BigDecimal,
    pub category: String,
    pub emoji: String,
    pub image_url: Option<String>,
    pub is_active: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CampaignData{
    pub id: i32,
    pub title: String,
    pub description: String,
    pub recipient_address: String,
    pub goal_amount: String,
    pub raised_amount: String,
    pub donor_count: i64,
    pub instant_donations: i64,
    pub emoji: String,
    pub category: String,
    pub image_url: Option<String>,
    pub progress: f64,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CampaignsResponse{
    pub success: bool,
    pub campaigns: Vec<CampaignData>,
    pub total: i64,
}

impl Campaign{

    /*
        raised over goal as a percentage, not clamped, the record
        donation response reports this raw value so the caller can
        see an over funded campaign go past 100
    */
    pub fn raw_progress(&self) -> f64{
        if self.goal_amount > BigDecimal::zero(){
            (self.raised_amount.to_f64().unwrap_or(0.0) / self.goal_amount.to_f64().unwrap_or(1.0)) * 100.0
        } else{
            0.0
        }
    }

    /* the listing view clamps to [0, 100] for display */
    pub fn display_progress(&self) -> f64{
        self.raw_progress().min(100.0)
    }

    pub async fn find_by_id(campaign_id: i32, connection: &mut PooledConnection<ConnectionManager<PgConnection>>)
        -> Result<Campaign, PanelHttpResponse>{

        let single_campaign = campaigns::table
            .filter(campaigns::id.eq(campaign_id))
            .first::<Campaign>(connection);

        match single_campaign{
            Ok(campaign) => Ok(campaign),
            Err(diesel::result::Error::NotFound) => {
                let resp = ErrorResponse{
                    success: false,
                    error: CAMPAIGN_NOT_FOUND.to_string(),
                };
                Err(
                    Ok(HttpResponse::NotFound().json(resp))
                )
            },
            Err(e) => Err(storage_error_resp("Campaign::find_by_id", e).await),
        }

    }

    /*
        all active campaigns ordered newest first, each annotated
        with its distinct donor count and the count of donations
        that went through an auto spend permission
    */
    pub async fn get_all_active(connection: &mut PooledConnection<ConnectionManager<PgConnection>>)
        -> Result<Vec<CampaignData>, PanelHttpResponse>{

        let active_campaigns = campaigns::table
            .filter(campaigns::is_active.eq(true))
            .order(campaigns::created_at.desc())
            .load::<Campaign>(connection);

        let campaign_rows = match active_campaigns{
            Ok(rows) => rows,
            Err(e) => return Err(storage_error_resp("Campaign::get_all_active", e).await),
        };

        let mut campaigns_data = Vec::new();
        for campaign in campaign_rows{

            let donor_count = match donations::table
                .filter(donations::campaign_id.eq(campaign.id))
                .select(diesel::dsl::count_distinct(donations::donor_address))
                .get_result::<i64>(connection)
                {
                    Ok(count) => count,
                    Err(e) => return Err(storage_error_resp("Campaign::get_all_active", e).await),
                };

            let instant_donations = match donations::table
                .filter(donations::campaign_id.eq(campaign.id))
                .filter(donations::used_spend_permission.eq(true))
                .count()
                .get_result::<i64>(connection)
                {
                    Ok(count) => count,
                    Err(e) => return Err(storage_error_resp("Campaign::get_all_active", e).await),
                };

            campaigns_data.push(
                CampaignData{
                    id: campaign.id,
                    title: campaign.title.clone(),
                    description: campaign.description.clone(),
                    recipient_address: campaign.recipient_address.clone(),
                    goal_amount: campaign.goal_amount.to_string(),
                    raised_amount: campaign.raised_amount.to_string(),
                    donor_count,
                    instant_donations,
                    emoji: campaign.emoji.clone(),
                    category: campaign.category.clone(),
                    image_url: campaign.image_url.clone(),
                    progress: campaign.display_progress(),
                    created_at: campaign.created_at.to_string(),
                }
            );

        }

        Ok(campaigns_data)

    }

}


#[cfg(test)]
mod tests{

    use super::*;

    fn campaign_with(goal: &str, raised: &str) -> Campaign{
        Campaign{
            id: 1,
            title: "Emergency Relief Fund".to_string(),
            description: "Rapid response aid".to_string(),
            recipient_address: "0x742d35cc6634c0532925a3b844bc454e4438f44e".to_string(),
            goal_amount: goal.parse::<BigDecimal>().unwrap(),
            raised_amount: raised.parse::<BigDecimal>().unwrap(),
            category: "humanitarian".to_string(),
            emoji: "🤝".to_string(),
            image_url: None,
            is_active: true,
            created_at: chrono::NaiveDateTime::default(),
            updated_at: chrono::NaiveDateTime::default(),
        }
    }

    #[test]
    fn partial_progress_is_not_clamped(){
        let campaign = campaign_with("1.0", "0.4");
        assert!((campaign.raw_progress() - 40.0).abs() < 1e-9);
        assert!((campaign.display_progress() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn over_funded_campaign_clamps_only_for_display(){
        let campaign = campaign_with("1.0", "1.1");
        assert!((campaign.raw_progress() - 110.0).abs() < 1e-9);
        assert!((campaign.display_progress() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_goal_reports_zero_progress(){
        let campaign = campaign_with("0", "3.5");
        assert_eq!(campaign.raw_progress(), 0.0);
        assert_eq!(campaign.display_progress(), 0.0);
    }

}
