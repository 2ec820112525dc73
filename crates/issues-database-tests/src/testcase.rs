use futures::Future;
use issues_config::Config;
use issues_database_interface::DbService;
use issues_database_memory::MemoryDb;
use issues_database_pg::{
    create_db_pool_connection, create_db_url, get_base_url, setup_test_db, teardown_test_db,
    PostgresDb,
};
use tracing::info;

type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

/// Run a storage test against every available backend.
///
/// Postgres runs only when `ISSUES_DATABASE_PG_URL` is set.
pub async fn db_test_case<F, Fut>(test_name: &str, block: F)
where
    F: Fn(Box<dyn DbService>) -> Fut,
    Fut: Future<Output = TestResult>,
{
    let mut config = Config::from_env_no_version().unwrap();
    let full_name = format!("test-issues-{test_name}");

    {
        // In memory
        let mem_db = Box::new(MemoryDb::new());
        info!("running memory test {full_name} ...");
        block(mem_db).await.unwrap();
    }

    if config.database.pg.url.is_empty() {
        info!("skipping postgres test {full_name}: no database URL");
        return;
    }

    {
        // Postgres
        let base_url = get_base_url(&config.database.pg.url);
        config.database.pg.url = create_db_url(&base_url, &full_name);
        config.database.pg.pool_size = 2;
        config.database.pg.connection_timeout = 5;

        setup_test_db(&base_url, &full_name).await.unwrap();

        let pool = create_db_pool_connection(&config, &base_url, &full_name)
            .await
            .unwrap();
        let pg_db = Box::new(PostgresDb::new(pool));
        info!("running postgres test {full_name} ...");
        let result = block(pg_db).await;

        teardown_test_db(&base_url, &full_name).await.unwrap();
        result.unwrap();
    }
}
