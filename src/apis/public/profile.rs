

use std::sync::Arc;
use actix_web::{get, post, web, HttpResponse};
use actix_web::http::StatusCode;
use crate::constants::*;
use crate::helpers::misc::{AddressQuery, get_pool_connection, normalize_address};
use crate::helpers::storage::Storage;
use crate::models::donations::Donation;
use crate::models::user_profiles::{CheckPermissionResponse, UpdateSubAccountRequest, UpdateSubAccountResponse, UserProfile};
use crate::resp_err;

/* link a wallet to its sub account for auto spend donations */
#[post("/update-sub-account")]
pub async fn update_sub_account(
        input: web::Json<UpdateSubAccountRequest>,
        storage: web::Data<Option<Arc<Storage>>>, // shared storage (diesel postgres pool)
    ) -> PanelHttpResponse{

    let wallet_address = input.wallet_address.as_deref().map(normalize_address).unwrap_or_default();
    let sub_account_address = input.sub_account_address.as_deref().map(normalize_address).unwrap_or_default();

    if wallet_address.is_empty() || sub_account_address.is_empty(){
        resp_err!{
            MISSING_REQUIRED_FIELDS, // response message
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

            let mut connection = match get_pool_connection("update_sub_account", pg_pool).await{
                Ok(connection) => connection,
                Err(resp) => return resp,
            };

            match UserProfile::update_sub_account(&wallet_address, &sub_account_address, &mut connection).await{
                Ok((_profile_data, created)) => {

                    let resp = UpdateSubAccountResponse{
                        success: true,
                        message: SUB_ACCOUNT_UPDATED.to_string(),
                        created,
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

/* check whether a wallet has an active spend permission and a linked sub account */
#[get("/check-permission")]
pub async fn check_permission(
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

            let mut connection = match get_pool_connection("check_permission", pg_pool).await{
                Ok(connection) => connection,
                Err(resp) => return resp,
            };

            let maybe_profile = match UserProfile::find_by_wallet(&wallet_address, &mut connection).await{
                Ok(maybe_profile) => maybe_profile,
                Err(resp) => return resp,
            };

            match maybe_profile{
                Some(profile) => {

                    let has_permission = match Donation::has_permission_donation(&wallet_address, &mut connection).await{
                        Ok(flag) => flag,
                        Err(resp) => return resp,
                    };

                    let resp = CheckPermissionResponse{
                        success: true,
                        has_permission,
                        has_sub_account: profile.has_sub_account,
                        sub_account_address: profile.sub_account_address,
                    };
                    Ok(HttpResponse::Ok().json(resp))

                },
                None => Ok(HttpResponse::Ok().json(CheckPermissionResponse::unknown_wallet())),
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
