




// -----====-----====-----====-----====-----====-----====-----====-----====
// bootstraps the whole panel process: loads the env, initializes the
// logger, builds the shared storage instance then mounts every /api
// route on an actix HttpServer bound to the host and port env vars.
// -----====-----====-----====-----====-----====-----====-----====-----====
#[macro_export]
macro_rules! server {

    () => {

        {

            use std::env;
            use actix_web::{web, App, HttpServer, middleware::Logger};
            use actix_cors::Cors;
            use dotenv::dotenv;
            use env_logger::Env;
            use log::{info, error};
            use crate::constants::*;
            use crate::error::{PanelError, ErrorKind, ServerError};
            use crate::services;

            dotenv().ok();
            env_logger::init_from_env(Env::default().default_filter_or("info"));

            let host = env::var("HOST").expect("⚠️ no host variable set");
            let port = env::var("PANEL_PORT").expect("⚠️ no panel port variable set").parse::<u16>().unwrap();
            let db_host = env::var("DB_HOST").expect("⚠️ no db host variable set");
            let db_port = env::var("DB_PORT").expect("⚠️ no db port variable set");
            let db_engine = env::var("DB_ENGINE").expect("⚠️ no db engine variable set");
            let db_username = env::var("DB_USERNAME").expect("⚠️ no db username variable set");
            let db_password = env::var("DB_PASSWORD").expect("⚠️ no db password variable set");
            let db_name = env::var("DB_NAME").expect("⚠️ no db name variable set");

            let app_storage = crate::storage!{ // this publicly has exported inside the storage helper
                db_name,
                db_engine,
                db_host,
                db_port,
                db_username,
                db_password
            }.await;

            /*
                the storage gets shared between all the actix worker threads
                behind an Arc, cloning it per worker is just a pointer bump
            */
            let shared_storage = app_storage.clone();

            info!("➔ 🚀 {} panel server has launched from [{}:{}] at {}",
                APP_NAME, host, port, chrono::Local::now().naive_local()
            );

            let server = HttpServer::new(move ||{
                App::new()
                    /* SHARED STORAGE */
                    .app_data(web::Data::new(shared_storage.clone()))
                    .wrap(Cors::permissive())
                    .wrap(Logger::default())
                    .wrap(Logger::new("%a %{User-Agent}i %t %P %r %s %b %T %D"))
                    /* PUBLIC APIS */
                    .service(
                        web::scope("/api")
                            .configure(services::init_public)
                    )
                })
                .bind((host.as_str(), port));

            match server{
                Ok(server) => {
                    server
                        .workers(10)
                        .run()
                        .await
                },
                Err(e) => {

                    /* custom error handler */
                    let msg_content = e.to_string();
                    let error_kind = ErrorKind::Server(ServerError::ActixWeb(e));
                    let error_instance = PanelError::new(*SERVER_IO_ERROR_CODE, msg_content.clone().into_bytes(), error_kind, "main");
                    let error_buffer = error_instance.write().await; /* write to file also returns the full filled buffer */

                    error!("⚠️ panel server bind error: {}", msg_content);
                    Err(std::io::Error::new(std::io::ErrorKind::AddrNotAvailable, String::from_utf8_lossy(&error_buffer).to_string()))

                }
            }

        }

    };
}
