

use std::sync::Arc;
use actix_web::{get, post, web, HttpResponse};
use actix_web::http::StatusCode;
use crate::constants::*;
use crate::helpers::misc::{AddressQuery, get_pool_connection, normalize_address};
use crate::helpers::storage::Storage;
use crate::models::donations::{Donation, NewDonationRequest, RecordDonationResponse, UserDonationsResponse};
use crate::models::stats::PlatformStatsData;
use crate::models::user_profiles::UserProfile;
use crate::resp_err;

/*
    record a donation with auto spend permission tracking, the insert
    plus campaign and profile aggregate bumps run in one transaction
    inside Donation::insert
*/
#[post("/record-donation")]
pub async fn record_donation(
        input: web::Json<NewDonationRequest>,
        storage: web::Data<Option<Arc<Storage>>>, // shared storage (diesel postgres pool)
    ) -> PanelHttpResponse{

    let app_storage = storage.as_ref().to_owned();
    let Some(app_storage) = app_storage else{
        resp_err!{
            STORAGE_ISSUE, // response message
            StatusCode::INTERNAL_SERVER_ERROR, // status code
        }
    };

    match app_storage.get_pgdb().await{
        Some(pg_pool) => {

            let mut connection = match get_pool_connection("record_donation", pg_pool).await{
                Ok(connection) => connection,
                Err(resp) => return resp,
            };

            match Donation::insert(input.into_inner(), &mut connection).await{
                Ok((donation_data, campaign_progress)) => {

                    let resp = RecordDonationResponse{
                        success: true,
                        donation_id: donation_data.id,
                        message: DONATION_RECORDED.to_string(),
                        used_auto_spend: donation_data.used_sub_account,
                        campaign_progress,
                    };
                    Ok(HttpResponse::Ok().json(resp))

                },
                Err(resp) => resp,
            }

        },
        None => {
            resp_err!{
                STORAGE_ISSUE, // response message
                StatusCode::INTERNAL_SERVER_ERROR, // status code
            }
        }
    }

}

/* get a wallet's donation history with its auto spend usage */
#[get("/user-donations")]
pub async fn user_donations(
        query: web::Query<AddressQuery>,
        storage: web::Data<Option<Arc<Storage>>>, // shared storage (diesel postgres pool)
    ) -> PanelHttpResponse{

    let wallet_address = query.address.as_deref().map(normalize_address).unwrap_or_default();
    if wallet_address.is_empty(){
        resp_err!{
            ADDRESS_REQUIRED, // response message
            StatusCode::BAD_REQUEST, // status code
        }
    }

    let app_storage = storage.as_ref().to_owned();
    let Some(app_storage) = app_storage else{
        resp_err!{
            STORAGE_ISSUE, // response message
            StatusCode::INTERNAL_SERVER_ERROR, // status code
        }
    };

    match app_storage.get_pgdb().await{
        Some(pg_pool) => {

            let mut connection = match get_pool_connection("user_donations", pg_pool).await{
                Ok(connection) => connection,
                Err(resp) => return resp,
            };

            /* profiles come into being lazily on first read */
            let (profile, _created) = match UserProfile::get_or_create(&wallet_address, &mut connection).await{
                Ok(profile_and_flag) => profile_and_flag,
                Err(resp) => return resp,
            };

            match Donation::get_all_for(&wallet_address, &mut connection).await{
                Ok((donations_data, auto_spend_count, auto_spend_percentage)) => {

                    let resp = UserDonationsResponse{
                        success: true,
                        donations: donations_data,
                        total_donated: profile.total_donated.to_string(),
                        donation_count: profile.donation_count,
                        has_sub_account: profile.has_sub_account,
                        sub_account_address: profile.sub_account_address,
                        auto_spend_count,
                        auto_spend_percentage,
                    };
                    Ok(HttpResponse::Ok().json(resp))

                },
                Err(resp) => resp,
            }

        },
        None => {
            resp_err!{
                STORAGE_ISSUE, // response message
                StatusCode::INTERNAL_SERVER_ERROR, // status code
            }
        }
    }

}

/* get platform statistics with the auto spend metrics */
#[get("/stats")]
pub async fn get_stats(
        storage: web::Data<Option<Arc<Storage>>>, // shared storage (diesel postgres pool)
    ) -> PanelHttpResponse{

    let app_storage = storage.as_ref().to_owned();
    let Some(app_storage) = app_storage else{
        resp_err!{
            STORAGE_ISSUE, // response message
            StatusCode::INTERNAL_SERVER_ERROR, // status code
        }
    };

    match app_storage.get_pgdb().await{
        Some(pg_pool) => {

            let mut connection = match get_pool_connection("get_stats", pg_pool).await{
                Ok(connection) => connection,
                Err(resp) => return resp,
            };

            match PlatformStatsData::calculate(&mut connection).await{
                Ok(stats_data) => Ok(HttpResponse::Ok().json(stats_data)),
                Err(resp) => resp,
            }

        },
        None => {
            resp_err!{
                STORAGE_ISSUE, // response message
                StatusCode::INTERNAL_SERVER_ERROR, // status code
            }
        }
    }

}
