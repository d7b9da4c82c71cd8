




/*  > -----------------------------------------------------------------------------------
    |  public apis, no authentication required, everything is keyed off wallet addresses
    | ------------------------------------------------------------------------------------
    |
    |  all the following routes get mounted under the /api scope inside the server macro
    |
*/
pub fn init_public(config: &mut actix_web::web::ServiceConfig){

    config.service(crate::apis::public::exports::get_campaigns);
    config.service(crate::apis::public::exports::get_stats);
    config.service(crate::apis::public::exports::user_donations);
    config.service(crate::apis::public::exports::record_donation);
    config.service(crate::apis::public::exports::update_sub_account);
    config.service(crate::apis::public::exports::check_permission);

}
