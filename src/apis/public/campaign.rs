

use std::sync::Arc;
use actix_web::{get, web, HttpResponse};
use actix_web::http::StatusCode;
use crate::constants::*;
use crate::helpers::misc::get_pool_connection;
use crate::helpers::storage::Storage;
use crate::models::campaigns::{Campaign, CampaignsResponse};
use crate::resp_err;

/* get all active donation campaigns with their real time stats */
#[get("/campaigns")]
pub async fn get_campaigns(
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

            let mut connection = match get_pool_connection("get_campaigns", pg_pool).await{
                Ok(connection) => connection,
                Err(resp) => return resp,
            };

            match Campaign::get_all_active(&mut connection).await{
                Ok(campaigns_data) => {

                    let resp = CampaignsResponse{
                        success: true,
                        total: campaigns_data.len() as i64,
                        campaigns: campaigns_data,
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
