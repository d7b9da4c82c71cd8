

/*
   -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=
      QUICKGIVE PANEL CUSTOM ERROR HANDLER
   -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=
*/

use std::io::Write;
use log::error;
use tokio::io::AsyncWriteExt;
use crate::constants::LOGS_FOLDER_ERROR_KIND;

#[derive(Debug)]
pub struct PanelError{
    pub code: u16,
    pub msg: Vec<u8>, // reason
    pub kind: ErrorKind, // due to what service
    pub method_name: String, // the method caused the error
}

#[derive(Debug)]
pub enum StorageError{
    Diesel(diesel::result::Error),
    Pool(diesel::r2d2::PoolError),
}

#[derive(Debug)]
pub enum ServerError{
    ActixWeb(std::io::Error),
}

#[derive(Debug)]
pub enum ErrorKind{
    Server(ServerError), // actix server io
    Storage(StorageError), // diesel, r2d2
}

impl std::fmt::Display for ErrorKind{

    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result{
        write!(f, "{:?}", self)
    }
}

/* can be made using from() method */
impl From<std::io::Error> for ErrorKind{
    fn from(error: std::io::Error) -> Self{
        ErrorKind::Server(ServerError::ActixWeb(error))
    }
}

impl From<diesel::result::Error> for ErrorKind{
    fn from(error: diesel::result::Error) -> Self{
        ErrorKind::Storage(StorageError::Diesel(error))
    }
}

impl From<diesel::r2d2::PoolError> for ErrorKind{
    fn from(error: diesel::r2d2::PoolError) -> Self{
        ErrorKind::Storage(StorageError::Pool(error))
    }
}

impl From<(Vec<u8>, u16, ErrorKind, String)> for PanelError{
    fn from(msg_code_kind_method: (Vec<u8>, u16, ErrorKind, String)) -> PanelError{
        PanelError{
            code: msg_code_kind_method.1,
            msg: msg_code_kind_method.0,
            kind: msg_code_kind_method.2,
            method_name: msg_code_kind_method.3
        }
    }
}

impl PanelError{

    pub fn new(code: u16, msg: Vec<u8>, kind: ErrorKind, method_name: &str) -> Self{
        PanelError::from((msg, code, kind, method_name.to_string()))
    }

    /* appends the error to the panel error log file, returns the filled buffer */
    pub async fn write(&self) -> Vec<u8>{

        let this = self;
        let Self{ code, msg, kind, method_name } = this;

        let msg_content = String::from_utf8_lossy(msg);
        let error_log_content = format!(
            "code: {} | message: {} | due to: {} | method: {} | time: {}\n",
            code, msg_content, kind, method_name, chrono::Local::now().timestamp_millis()
        );

        /* writing to buffer */
        let mut buffer = Vec::new();
        let _ = write!(&mut buffer, "{}", error_log_content);

        /* writing to file */
        if let Err(e) = tokio::fs::create_dir_all(LOGS_FOLDER_ERROR_KIND).await{
            error!("⚠️ can't create error log folder: {}", e);
            return buffer;
        }

        let filepath = format!("{}/panel-error.log", LOGS_FOLDER_ERROR_KIND);
        match tokio::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(filepath.as_str())
            .await
            {
                Ok(mut file) => {
                    if let Err(e) = file.write_all(error_log_content.as_bytes()).await{
                        error!("⚠️ can't append to error log file: {}", e);
                    }
                },
                Err(e) => {
                    error!("⚠️ can't open error log file: {}", e);
                }
            }

        buffer

    }

}
