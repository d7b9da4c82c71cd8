

use bigdecimal::{BigDecimal, Zero};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use serde::{Serialize, Deserialize};
use crate::constants::*;
use crate::helpers::misc::storage_error_resp;
use crate::schema::user_profiles;

#[derive(Identifiable, Selectable, Queryable, Debug, Clone)]
#[diesel(table_name=user_profiles)]
pub struct UserProfile{ /* note that the ordering of fields must be the same as the table fields in up.sql */
    pub id: i32,
    pub wallet_address: String,
    pub total_donated: BigDecimal, /* aggregates mirror this wallet's donation rows, maintained by the recorder */
    pub donation_count: i32,
    pub sub_account_address: Option<String>,
    pub has_sub_account: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name=user_profiles)]
pub struct NewUserProfile{
    pub wallet_address: String,
    pub total_donated: BigDecimal,
    pub donation_count: i32,
    pub sub_account_address: Option<String>,
    pub has_sub_account: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UserProfileData{
    pub id: i32,
    pub wallet_address: String,
    pub total_donated: String,
    pub donation_count: i32,
    pub sub_account_address: Option<String>,
    pub has_sub_account: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UpdateSubAccountRequest{
    pub wallet_address: Option<String>,
    pub sub_account_address: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UpdateSubAccountResponse{
    pub success: bool,
    pub message: String,
    pub created: bool, /* whether the profile row itself was created, not whether the link changed */
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CheckPermissionResponse{
    pub success: bool,
    pub has_permission: bool,
    pub has_sub_account: bool,
    pub sub_account_address: Option<String>,
}

impl From<UserProfile> for UserProfileData{
    fn from(profile: UserProfile) -> UserProfileData{
        UserProfileData{
            id: profile.id,
            wallet_address: profile.wallet_address,
            total_donated: profile.total_donated.to_string(),
            donation_count: profile.donation_count,
            sub_account_address: profile.sub_account_address,
            has_sub_account: profile.has_sub_account,
            created_at: profile.created_at.to_string(),
            updated_at: profile.updated_at.to_string(),
        }
    }
}

impl CheckPermissionResponse{

    /* a wallet we've never seen is all defaults, never an error */
    pub fn unknown_wallet() -> Self{
        CheckPermissionResponse{
            success: true,
            has_permission: false,
            has_sub_account: false,
            sub_account_address: None,
        }
    }

}

impl UserProfile{

    pub async fn find_by_wallet(wallet_address: &str, connection: &mut PooledConnection<ConnectionManager<PgConnection>>)
        -> Result<Option<UserProfile>, PanelHttpResponse>{

        let single_profile = user_profiles::table
            .filter(user_profiles::wallet_address.eq(wallet_address))
            .first::<UserProfile>(connection)
            .optional();

        match single_profile{
            Ok(profile) => Ok(profile),
            Err(e) => Err(storage_error_resp("UserProfile::find_by_wallet", e).await),
        }

    }

    /* profiles are created lazily, zero initialized, on first read or first donation */
    pub async fn get_or_create(wallet_address: &str, connection: &mut PooledConnection<ConnectionManager<PgConnection>>)
        -> Result<(UserProfile, bool), PanelHttpResponse>{

        let existing_profile = match Self::find_by_wallet(wallet_address, connection).await{
            Ok(profile) => profile,
            Err(resp) => return Err(resp),
        };

        if let Some(profile) = existing_profile{
            return Ok((profile, false));
        }

        let new_profile = NewUserProfile{
            wallet_address: wallet_address.to_string(),
            total_donated: BigDecimal::zero(),
            donation_count: 0,
            sub_account_address: None,
            has_sub_account: false,
        };

        match diesel::insert_into(user_profiles::table)
            .values(&new_profile)
            .returning(UserProfile::as_returning())
            .get_result::<UserProfile>(connection)
            {
                Ok(profile) => Ok((profile, true)),
                Err(e) => Err(storage_error_resp("UserProfile::get_or_create", e).await),
            }

    }

    /*
        the sub account linker: unconditionally points the profile at
        the passed in sub account, idempotent, created only reports
        whether the profile row was just made
    */
    pub async fn update_sub_account(wallet_address: &str, sub_account_address: &str, connection: &mut PooledConnection<ConnectionManager<PgConnection>>)
        -> Result<(UserProfileData, bool), PanelHttpResponse>{

        let (profile, created) = match Self::get_or_create(wallet_address, connection).await{
            Ok(profile_and_flag) => profile_and_flag,
            Err(resp) => return Err(resp),
        };

        match diesel::update(user_profiles::table.find(profile.id))
            .set((
                user_profiles::sub_account_address.eq(sub_account_address.to_string()),
                user_profiles::has_sub_account.eq(true),
                user_profiles::updated_at.eq(chrono::Local::now().naive_local()),
            ))
            .returning(UserProfile::as_returning())
            .get_result::<UserProfile>(connection)
            {
                Ok(updated_profile) => Ok((UserProfileData::from(updated_profile), created)),
                Err(e) => Err(storage_error_resp("UserProfile::update_sub_account", e).await),
            }

    }

}


#[cfg(test)]
mod tests{

    use super::*;

    #[test]
    fn unknown_wallet_permission_defaults_are_all_false(){
        let value = serde_json::to_value(CheckPermissionResponse::unknown_wallet()).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["has_permission"], false);
        assert_eq!(value["has_sub_account"], false);
        assert!(value["sub_account_address"].is_null());
    }

    #[test]
    fn profile_data_serializes_amounts_as_decimal_strings(){
        let profile = UserProfile{
            id: 3,
            wallet_address: "0xabc".to_string(),
            total_donated: "12.5".parse::<BigDecimal>().unwrap(),
            donation_count: 4,
            sub_account_address: None,
            has_sub_account: false,
            created_at: chrono::NaiveDateTime::default(),
            updated_at: chrono::NaiveDateTime::default(),
        };
        let value = serde_json::to_value(UserProfileData::from(profile)).unwrap();
        assert_eq!(value["total_donated"], "12.5");
        assert_eq!(value["donation_count"], 4);
        assert!(value["sub_account_address"].is_null());
    }

}
