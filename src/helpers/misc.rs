

use actix_web::HttpResponse;
use bigdecimal::{BigDecimal, Zero};
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use serde::{Serialize, Deserialize};
use crate::constants::*;
use crate::error::{ErrorKind, StorageError, PanelError};

/*
    error body shared by every endpoint, the success flag is
    always false in here cause successful responses carry their
    own per endpoint shapes
*/
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse{
    pub success: bool,
    pub error: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct AddressQuery{
    pub address: Option<String>,
}

/* ----------------------------------------------------------------------- */
/* --------------------------- HELPER METHODS ---------------------------- */
/* ----------------------------------------------------------------------- */

/* wallet and tx hashes are opaque hex strings, stored and compared lower case */
pub fn normalize_address(raw: &str) -> String{
    raw.trim().to_lowercase()
}

/* donation amounts cross the wire as decimal strings, never floats */
pub fn parse_positive_amount(raw: &str) -> Option<BigDecimal>{
    let parsed = raw.trim().parse::<BigDecimal>().ok()?;
    if parsed > BigDecimal::zero(){
        Some(parsed)
    } else{
        None
    }
}

pub fn round_one_decimal(value: f64) -> f64{
    (value * 10.0).round() / 10.0
}

/*
    checks a pooled connection out for the caller api, on failure the
    error goes to the panel error log and the caller gets terminated
    with a 500 response
*/
pub async fn get_pool_connection(caller: &str, pg_pool: &Pool<ConnectionManager<PgConnection>>)
    -> Result<PooledConnection<ConnectionManager<PgConnection>>, PanelHttpResponse>{

    match pg_pool.get(){
        Ok(connection) => Ok(connection),
        Err(e) => {
            let resp_err = e.to_string();
            let error_content = resp_err.as_bytes().to_vec();
            let error_instance = PanelError::new(*STORAGE_IO_ERROR_CODE, error_content, ErrorKind::Storage(StorageError::Pool(e)), caller);
            let _error_buffer = error_instance.write().await; /* write to file also returns the full filled buffer from the error */
            Err(
                Ok(HttpResponse::InternalServerError().json(
                    ErrorResponse{
                        success: false,
                        error: resp_err,
                    }
                ))
            )
        }
    }

}

/* 500 response for an unexpected diesel failure, raw message surfaced to the client */
pub async fn storage_error_resp(caller: &str, e: diesel::result::Error) -> PanelHttpResponse{

    let resp_err = e.to_string();
    let error_content = resp_err.as_bytes().to_vec();
    let error_instance = PanelError::new(*STORAGE_IO_ERROR_CODE, error_content, ErrorKind::Storage(StorageError::Diesel(e)), caller);
    let _error_buffer = error_instance.write().await; /* write to file also returns the full filled buffer from the error */

    Ok(
        HttpResponse::InternalServerError().json(
            ErrorResponse{
                success: false,
                error: resp_err,
            }
        )
    )

}

// -----====-----====-----====-----====-----====-----====-----====
// error resp object macro, builds the {success: false, error}
// body with the passed in status code and terminates the caller
// api, the successful arms build their own response shapes.
// -----====-----====-----====-----====-----====-----====-----====
#[macro_export]
macro_rules! resp_err {
    (
        $msg:expr,
        $code:expr,
    ) => {

        {
            use actix_web::HttpResponse;
            use crate::helpers::misc::ErrorResponse;

            let resp = ErrorResponse{
                success: false,
                error: $msg.to_string(),
            };

            return Ok(
                HttpResponse::build($code).json(resp)
            );
        }
    }
}


#[cfg(test)]
mod tests{

    use super::*;

    #[test]
    fn addresses_are_trimmed_and_lower_cased(){
        assert_eq!(
            normalize_address("  0xAbCdEf0123456789abcdef0123456789ABCDEF01 "),
            "0xabcdef0123456789abcdef0123456789abcdef01"
        );
        assert_eq!(normalize_address(""), "");
    }

    #[test]
    fn positive_decimal_amounts_parse(){
        assert_eq!(parse_positive_amount("0.4").unwrap().to_string(), "0.4");
        assert_eq!(parse_positive_amount(" 12.500000 ").unwrap(), "12.5".parse::<BigDecimal>().unwrap());
    }

    #[test]
    fn non_positive_amounts_are_rejected(){
        assert!(parse_positive_amount("0").is_none());
        assert!(parse_positive_amount("0.000000").is_none());
        assert!(parse_positive_amount("-1.5").is_none());
    }

    #[test]
    fn garbage_amounts_are_rejected(){
        assert!(parse_positive_amount("").is_none());
        assert!(parse_positive_amount("abc").is_none());
        assert!(parse_positive_amount("1.2.3").is_none());
    }

    #[test]
    fn percentages_round_to_one_decimal(){
        assert_eq!(round_one_decimal(33.333333), 33.3);
        assert_eq!(round_one_decimal(66.666666), 66.7);
        assert_eq!(round_one_decimal(0.0), 0.0);
        assert_eq!(round_one_decimal(100.0), 100.0);
    }

}
