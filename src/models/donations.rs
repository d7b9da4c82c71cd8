

use actix_web::HttpResponse;
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use serde::{Serialize, Deserialize};
use crate::constants::*;
use crate::helpers::misc::{ErrorResponse, normalize_address, parse_positive_amount, round_one_decimal, storage_error_resp};
use crate::models::campaigns::Campaign;
use crate::models::user_profiles::{UserProfile, NewUserProfile};
use crate::schema::campaigns;
use crate::schema::donations;
use crate::schema::user_profiles;

#[derive(Identifiable, Selectable, Queryable, Debug, Clone)]
#[diesel(table_name=donations)]
pub struct Donation{ /* note that the ordering of fields must be the same as the table fields in up.sql */
    pub id: i32,
    pub donor_address: String,
    pub sub_account_address: Option<String>,
    pub campaign_id: i32,
    pub amount: BigDecimal,
    pub tx_hash: String, /* globally unique, the idempotency key of the recorder */
    pub block_number: Option<i32>,
    pub used_spend_permission: bool,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name=donations)]
pub struct NewDonation{
    pub donor_address: String,
    pub sub_account_address: Option<String>,
    pub campaign_id: i32,
    pub amount: BigDecimal,
    pub tx_hash: String,
    pub block_number: Option<i32>,
    pub used_spend_permission: bool,
}

/*
    the incoming record donation body, everything is optional in
    here so a half filled body still lands in the missing fields
    arm instead of a generic deserialize error
*/
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct NewDonationRequest{
    pub donor_address: Option<String>,
    pub sub_account_address: Option<String>,
    pub campaign_id: Option<i32>,
    pub amount: Option<String>, /* decimal string, never a float */
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub used_spend_permission: bool,
    pub block_number: Option<i32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedDonation{
    pub donor_address: String,
    pub sub_account_address: Option<String>,
    pub campaign_id: i32,
    pub amount: BigDecimal,
    pub tx_hash: String,
    pub used_spend_permission: bool,
    pub block_number: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DonationData{
    pub id: i32,
    pub campaign_id: i32,
    pub campaign_title: String,
    pub campaign_emoji: String,
    pub amount: String,
    pub tx_hash: String,
    pub used_sub_account: bool,
    pub block_number: Option<i32>,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RecordDonationResponse{
    pub success: bool,
    pub donation_id: i32,
    pub message: String,
    pub used_auto_spend: bool,
    pub campaign_progress: f64, /* raw percentage, the listing view is the one that clamps */
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UserDonationsResponse{
    pub success: bool,
    pub donations: Vec<DonationData>,
    pub total_donated: String,
    pub donation_count: i32,
    pub has_sub_account: bool,
    pub sub_account_address: Option<String>,
    pub auto_spend_count: i64,
    pub auto_spend_percentage: f64,
}

impl NewDonationRequest{

    /*
        validation order is part of the contract: missing fields,
        then amount, the campaign and duplicate checks need the db
        and happen inside insert()
    */
    pub fn validated(&self) -> Result<ValidatedDonation, &'static str>{

        let donor_address = self.donor_address.as_deref().map(normalize_address).unwrap_or_default();
        let tx_hash = self.tx_hash.as_deref().unwrap_or("").trim().to_string();
        let raw_amount = self.amount.as_deref().unwrap_or("").trim().to_string();

        if donor_address.is_empty() || self.campaign_id.is_none() || raw_amount.is_empty() || tx_hash.is_empty(){
            return Err(MISSING_REQUIRED_FIELDS);
        }

        let Some(amount) = parse_positive_amount(&raw_amount) else{
            return Err(INVALID_AMOUNT);
        };

        Ok(
            ValidatedDonation{
                donor_address,
                sub_account_address: self.sub_account_address
                    .as_deref()
                    .map(normalize_address)
                    .filter(|sub| !sub.is_empty()),
                campaign_id: self.campaign_id.unwrap(),
                amount,
                tx_hash,
                used_spend_permission: self.used_spend_permission,
                block_number: self.block_number,
            }
        )

    }

}

impl DonationData{

    pub fn from_row(donation: Donation, campaign: &Campaign) -> Self{
        DonationData{
            id: donation.id,
            campaign_id: campaign.id,
            campaign_title: campaign.title.clone(),
            campaign_emoji: campaign.emoji.clone(),
            amount: donation.amount.to_string(),
            tx_hash: donation.tx_hash,
            used_sub_account: donation.used_spend_permission,
            block_number: donation.block_number,
            created_at: donation.created_at.to_string(),
        }
    }

}

/*
    the error part of the following methods is of type Result<actix_web::HttpResponse, actix_web::Error>
    since in case of errors we'll terminate the caller with an error response like return Err(actix_ok_resp);
    and pass its encoded form (utf8 bytes) directly through the socket to the client
*/
impl Donation{

    /*
        the donation recorder: validates the body, then inserts the
        donation row, bumps the owning campaign raised_amount and the
        donor profile aggregates all inside one transaction so a
        concurrent reader can never observe a half applied donation,
        the increments run sql side to dodge the read increment write
        race on hot campaigns
    */
    pub async fn insert(record_request: NewDonationRequest, connection: &mut PooledConnection<ConnectionManager<PgConnection>>)
        -> Result<(DonationData, f64), PanelHttpResponse>{

        let validated = match record_request.validated(){
            Ok(validated) => validated,
            Err(invalid_msg) => {
                let resp = ErrorResponse{
                    success: false,
                    error: invalid_msg.to_string(),
                };
                return Err(
                    Ok(HttpResponse::BadRequest().json(resp))
                );
            }
        };

        let campaign = match Campaign::find_by_id(validated.campaign_id, connection).await{
            Ok(campaign) => campaign,
            Err(resp) => return Err(resp),
        };

        /* replaying the same on chain tx must be a no op error, not a double credit */
        let already_recorded = match Self::exists_for_tx_hash(&validated.tx_hash, connection).await{
            Ok(flag) => flag,
            Err(resp) => return Err(resp),
        };
        if already_recorded{
            let resp = ErrorResponse{
                success: false,
                error: DONATION_ALREADY_RECORDED.to_string(),
            };
            return Err(
                Ok(HttpResponse::BadRequest().json(resp))
            );
        }

        let new_donation = NewDonation{
            donor_address: validated.donor_address.clone(),
            sub_account_address: validated.sub_account_address.clone(),
            campaign_id: campaign.id,
            amount: validated.amount.clone(),
            tx_hash: validated.tx_hash.clone(),
            block_number: validated.block_number,
            used_spend_permission: validated.used_spend_permission,
        };

        let now = chrono::Local::now().naive_local();
        let tx_result = connection.transaction::<(Donation, Campaign), diesel::result::Error, _>(|conn|{

            let inserted_donation = diesel::insert_into(donations::table)
                .values(&new_donation)
                .returning(Donation::as_returning())
                .get_result::<Donation>(conn)?;

            let updated_campaign = diesel::update(campaigns::table.find(campaign.id))
                .set((
                    campaigns::raised_amount.eq(campaigns::raised_amount + validated.amount.clone()),
                    campaigns::updated_at.eq(now),
                ))
                .returning(Campaign::as_returning())
                .get_result::<Campaign>(conn)?;

            /* fetch or create the donor profile, zero initialized on first donation */
            let existing_profile = user_profiles::table
                .filter(user_profiles::wallet_address.eq(&validated.donor_address))
                .first::<UserProfile>(conn)
                .optional()?;

            match existing_profile{
                Some(profile) => {
                    /* sub account is last write wins and only touched when provided */
                    if let Some(sub_account) = &validated.sub_account_address{
                        diesel::update(user_profiles::table.find(profile.id))
                            .set((
                                user_profiles::total_donated.eq(user_profiles::total_donated + validated.amount.clone()),
                                user_profiles::donation_count.eq(user_profiles::donation_count + 1),
                                user_profiles::sub_account_address.eq(sub_account.clone()),
                                user_profiles::has_sub_account.eq(true),
                                user_profiles::updated_at.eq(now),
                            ))
                            .execute(conn)?;
                    } else{
                        diesel::update(user_profiles::table.find(profile.id))
                            .set((
                                user_profiles::total_donated.eq(user_profiles::total_donated + validated.amount.clone()),
                                user_profiles::donation_count.eq(user_profiles::donation_count + 1),
                                user_profiles::updated_at.eq(now),
                            ))
                            .execute(conn)?;
                    }
                },
                None => {
                    let new_profile = NewUserProfile{
                        wallet_address: validated.donor_address.clone(),
                        total_donated: validated.amount.clone(),
                        donation_count: 1,
                        sub_account_address: validated.sub_account_address.clone(),
                        has_sub_account: validated.sub_account_address.is_some(),
                    };
                    diesel::insert_into(user_profiles::table)
                        .values(&new_profile)
                        .execute(conn)?;
                }
            }

            Ok((inserted_donation, updated_campaign))

        });

        match tx_result{
            Ok((donation, updated_campaign)) => {
                let campaign_progress = updated_campaign.raw_progress();
                Ok((DonationData::from_row(donation, &updated_campaign), campaign_progress))
            },
            Err(e) => Err(storage_error_resp("Donation::insert", e).await),
        }

    }

    pub async fn exists_for_tx_hash(donation_tx_hash: &str, connection: &mut PooledConnection<ConnectionManager<PgConnection>>)
        -> Result<bool, PanelHttpResponse>{

        let tx_hash_exists = diesel::select(
                diesel::dsl::exists(
                    donations::table.filter(donations::tx_hash.eq(donation_tx_hash))
                )
            )
            .get_result::<bool>(connection);

        match tx_hash_exists{
            Ok(flag) => Ok(flag),
            Err(e) => Err(storage_error_resp("Donation::exists_for_tx_hash", e).await),
        }

    }

    /*
        donation history for a wallet, newest first and capped, the
        auto spend ratio is computed over the wallet's whole history
        rather than just the returned page
    */
    pub async fn get_all_for(wallet_address: &str, connection: &mut PooledConnection<ConnectionManager<PgConnection>>)
        -> Result<(Vec<DonationData>, i64, f64), PanelHttpResponse>{

        let wallet_donations = donations::table
            .inner_join(campaigns::table)
            .filter(donations::donor_address.eq(wallet_address))
            .order(donations::created_at.desc())
            .limit(USER_DONATIONS_LIMIT)
            .load::<(Donation, Campaign)>(connection);

        let rows = match wallet_donations{
            Ok(rows) => rows,
            Err(e) => return Err(storage_error_resp("Donation::get_all_for", e).await),
        };

        let total_count = match donations::table
            .filter(donations::donor_address.eq(wallet_address))
            .count()
            .get_result::<i64>(connection)
            {
                Ok(count) => count,
                Err(e) => return Err(storage_error_resp("Donation::get_all_for", e).await),
            };

        let auto_spend_count = match donations::table
            .filter(donations::donor_address.eq(wallet_address))
            .filter(donations::used_spend_permission.eq(true))
            .count()
            .get_result::<i64>(connection)
            {
                Ok(count) => count,
                Err(e) => return Err(storage_error_resp("Donation::get_all_for", e).await),
            };

        let auto_spend_percentage = if total_count > 0{
            round_one_decimal((auto_spend_count as f64 / total_count as f64) * 100.0)
        } else{
            0.0
        };

        let donations_data = rows
            .into_iter()
            .map(|(donation, campaign)| DonationData::from_row(donation, &campaign))
            .collect::<Vec<DonationData>>();

        Ok((donations_data, auto_spend_count, auto_spend_percentage))

    }

    /* whether any of the wallet's donations went through an auto spend permission */
    pub async fn has_permission_donation(wallet_address: &str, connection: &mut PooledConnection<ConnectionManager<PgConnection>>)
        -> Result<bool, PanelHttpResponse>{

        let permission_donation_exists = diesel::select(
                diesel::dsl::exists(
                    donations::table
                        .filter(donations::donor_address.eq(wallet_address))
                        .filter(donations::used_spend_permission.eq(true))
                )
            )
            .get_result::<bool>(connection);

        match permission_donation_exists{
            Ok(flag) => Ok(flag),
            Err(e) => Err(storage_error_resp("Donation::has_permission_donation", e).await),
        }

    }

}


#[cfg(test)]
mod tests{

    use super::*;

    fn full_request() -> NewDonationRequest{
        NewDonationRequest{
            donor_address: Some("0xAbCdEf0123456789abcdef0123456789ABCDEF01".to_string()),
            sub_account_address: Some("0xFEDCBA9876543210fedcba9876543210FEDCBA98".to_string()),
            campaign_id: Some(7),
            amount: Some("0.4".to_string()),
            tx_hash: Some("0xA".to_string()),
            used_spend_permission: true,
            block_number: Some(123456),
        }
    }

    #[test]
    fn valid_request_passes_and_normalizes_addresses(){
        let validated = full_request().validated().unwrap();
        assert_eq!(validated.donor_address, "0xabcdef0123456789abcdef0123456789abcdef01");
        assert_eq!(
            validated.sub_account_address.as_deref(),
            Some("0xfedcba9876543210fedcba9876543210fedcba98")
        );
        assert_eq!(validated.campaign_id, 7);
        assert_eq!(validated.amount, "0.4".parse::<BigDecimal>().unwrap());
        assert_eq!(validated.tx_hash, "0xA");
        assert!(validated.used_spend_permission);
        assert_eq!(validated.block_number, Some(123456));
    }

    #[test]
    fn missing_fields_fail_before_amount_validation(){
        /* tx hash is missing AND the amount is garbage, missing wins */
        let mut request = full_request();
        request.tx_hash = None;
        request.amount = Some("not-a-number".to_string());
        assert_eq!(request.validated().unwrap_err(), MISSING_REQUIRED_FIELDS);

        let mut request = full_request();
        request.donor_address = Some("   ".to_string());
        assert_eq!(request.validated().unwrap_err(), MISSING_REQUIRED_FIELDS);

        let mut request = full_request();
        request.campaign_id = None;
        assert_eq!(request.validated().unwrap_err(), MISSING_REQUIRED_FIELDS);
    }

    #[test]
    fn non_positive_amount_is_an_invalid_amount(){
        let mut request = full_request();
        request.amount = Some("0".to_string());
        assert_eq!(request.validated().unwrap_err(), INVALID_AMOUNT);

        let mut request = full_request();
        request.amount = Some("-0.5".to_string());
        assert_eq!(request.validated().unwrap_err(), INVALID_AMOUNT);

        let mut request = full_request();
        request.amount = Some("garbage".to_string());
        assert_eq!(request.validated().unwrap_err(), INVALID_AMOUNT);
    }

    #[test]
    fn omitted_or_empty_sub_account_stays_unset(){
        let mut request = full_request();
        request.sub_account_address = None;
        assert_eq!(request.validated().unwrap().sub_account_address, None);

        let mut request = full_request();
        request.sub_account_address = Some("".to_string());
        assert_eq!(request.validated().unwrap().sub_account_address, None);
    }

    #[test]
    fn body_deserializes_with_defaults(){
        let request = serde_json::from_str::<NewDonationRequest>(
            r#"{"donor_address":"0xA1","campaign_id":1,"amount":"0.4","tx_hash":"0xA"}"#
        ).unwrap();
        assert!(!request.used_spend_permission);
        assert_eq!(request.sub_account_address, None);
        assert_eq!(request.block_number, None);
    }

    #[test]
    fn record_response_shape_matches_the_contract(){
        let resp = RecordDonationResponse{
            success: true,
            donation_id: 42,
            message: DONATION_RECORDED.to_string(),
            used_auto_spend: false,
            campaign_progress: 110.0,
        };
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["donation_id"], 42);
        assert_eq!(value["message"], "Donation recorded successfully");
        assert_eq!(value["used_auto_spend"], false);
        assert_eq!(value["campaign_progress"], 110.0);
    }

}
