

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use uuid::Uuid;

/*  ----------------------
   | shared state storage
   |----------------------
   | diesel postgres pool shared between actix worker threads,
   | the pool itself serializes concurrent checkouts so no extra
   | application level locking is needed in here
   |
*/

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode{
    On, // connected to the storage
    Off, // detached from the storage
}

#[derive(Clone)]
pub struct Db{
    pub mode: Mode,
    pub engine: Option<String>,
    pub url: Option<String>,
    pub pool: Option<Pool<ConnectionManager<PgConnection>>>,
}

impl Default for Db{
    fn default() -> Db{
        Db{
            mode: Mode::Off,
            engine: None,
            url: None,
            pool: None,
        }
    }
}

impl Db{

    pub async fn new() -> Db{
        Db{
            mode: Mode::On,
            ..Default::default()
        }
    }

    pub async fn get_postgres_pool(&self) -> Pool<ConnectionManager<PgConnection>>{
        let uri = self.url.as_ref().unwrap().as_str();
        let manager = ConnectionManager::<PgConnection>::new(uri);
        Pool::builder().test_on_check_out(true).build(manager).unwrap()
    }

}

#[derive(Clone)]
pub struct Storage{
    pub id: Uuid,
    pub db: Option<Db>, // we could have no db at all
}

impl Storage{

    pub async fn get_pgdb(&self) -> Option<&Pool<ConnectionManager<PgConnection>>>{
        match self.db.as_ref()?.mode{
            Mode::On => self.db.as_ref()?.pool.as_ref(),
            Mode::Off => None, // no storage is available cause it's off
        }
    }

}

// -----====-----====-----====-----====-----====-----====-----====
// storage setup macro, gets called from the server! macro once
// per process to build the shared Option<Arc<Storage>> instance
// from the passed in db env vars before actix workers spin up.
// -----====-----====-----====-----====-----====-----====-----====
#[macro_export]
macro_rules! storage {

    ($name:expr, $engine:expr, $host:expr, $port:expr, $username:expr, $password:expr) => {

        async { // this curly braces is required to use let statements inside the macro

            use std::sync::Arc;
            use uuid::Uuid;
            use crate::helpers::storage::{Storage, Mode, Db};

            match $engine.as_str(){
                "postgres" => {

                    log::info!("➔ 🛢️ switching to postgres on address: [{}:{}]", $host, $port);
                    let db_addr = format!(
                        "{}://{}:{}@{}:{}/{}",
                        $engine, $username, $password, $host, $port, $name
                    );

                    let mut init_db = Db::new().await;
                    init_db.engine = Some($engine.clone());
                    init_db.url = Some(db_addr);
                    let pg_pool = init_db.get_postgres_pool().await;

                    Some(
                        Arc::new(
                            Storage{
                                id: Uuid::new_v4(),
                                db: Some(
                                    Db{
                                        mode: Mode::On,
                                        engine: init_db.engine,
                                        url: init_db.url,
                                        pool: Some(pg_pool),
                                    }
                                ),
                            }
                        )
                    )

                },
                _ => {
                    log::error!("⚠️ no storage is available cause the selected engine is not supported");
                    None
                }
            }

        }

    };
}
