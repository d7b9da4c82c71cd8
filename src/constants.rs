

pub const APP_NAME: &str = "QuickGive";
pub type PanelHttpResponse = Result<actix_web::HttpResponse, actix_web::Error>;

/* response messages, the donation flow ones are part of the client contract */
pub static STORAGE_ISSUE: &str = "Storage Is Not Available";
pub static ADDRESS_REQUIRED: &str = "Address required";
pub static MISSING_REQUIRED_FIELDS: &str = "Missing required fields";
pub static INVALID_AMOUNT: &str = "Invalid amount";
pub static CAMPAIGN_NOT_FOUND: &str = "Campaign not found";
pub static DONATION_ALREADY_RECORDED: &str = "Donation already recorded";
pub static DONATION_RECORDED: &str = "Donation recorded successfully";
pub static SUB_ACCOUNT_UPDATED: &str = "Sub account updated successfully";

/* u16 bits is 2 bytes long which is 4 chars in hex */
pub static SERVER_IO_ERROR_CODE: &u16 = &0xFFFE;
pub static STORAGE_IO_ERROR_CODE: &u16 = &0xFFFF;

pub const LOGS_FOLDER_ERROR_KIND: &str = "logs/error-kind";

/* up to this many rows come back from the user donation history endpoint */
pub const USER_DONATIONS_LIMIT: i64 = 50;
