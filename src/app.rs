

/*
   -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=
        QUICKGIVE DONATION PANEL SERVER
   -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=
   HTTP JSON endpoints for listing donation campaigns,
   recording on-chain donations, maintaining per-wallet
   profiles and answering auto spend permission queries,
   all backed by a diesel postgres pool shared between
   actix worker threads.
*/

mod apis;
mod constants;
mod error;
mod helpers;
mod models;
mod schema;
mod server;
mod services;

#[actix_web::main]
async fn main() -> std::io::Result<()> {

    let server = crate::server!{};

    server

}
