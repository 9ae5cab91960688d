use std::sync::Arc;

use chrono::Local;
use gigboard_core::db;
use gigboard_core::db::DbPool;

pub fn get_test_db_path(test_id: String) -> String {
    let now = Local::now();

    now.format(&format!("./tests/output/%Y%m%d/%H%M%S-{}/", test_id))
        .to_string()
}

pub fn get_test_pool(db_path: String) -> Arc<DbPool> {
    let db_file = db::init(&db_path).expect("Failed to initialize database");

    let pool = db::create_pool(&db_file).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");

    pool
}

#[allow(dead_code)]
pub fn delete_db_file(db_path: String) {
    std::fs::remove_file(format!("{}gigboard.db", db_path)).unwrap();
    std::fs::remove_dir(db_path).unwrap();
}
