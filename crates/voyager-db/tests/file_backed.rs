//! File-backed database tests:
//! - Data and the migration ledger survive reopening
//! - Concurrent readers share a bounded pool

use std::sync::Arc;

use tempfile::TempDir;

use voyager_core::entities::Exoplanet;
use voyager_core::enums::ExoplanetType;
use voyager_db::VoyagerDb;
use voyager_db::migrations::MigrationState;
use voyager_db::pool::PoolConfig;
use voyager_db::query::ExoplanetFilter;
use voyager_db::service::VoyagerService;

fn db_path(dir: &TempDir) -> String {
    dir.path().join("voyager.db").to_string_lossy().into_owned()
}

fn rock(name: &str, distance: f64) -> Exoplanet {
    Exoplanet::new(ExoplanetType::Terrestrial, name, "Rocky", distance, 1.0, 1.0)
}

#[tokio::test]
async fn data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = db_path(&dir);

    let id = {
        let svc = VoyagerService::new_local(&path).await.unwrap();
        svc.create_exoplanet(&rock("Kepler-22b", 600.0))
            .await
            .unwrap()
            .id
    };

    let db = VoyagerDb::open_local(&path, PoolConfig::default())
        .await
        .unwrap();
    let report = db.run_migrations().await.unwrap();
    assert!(report.applied.is_empty());
    assert_eq!(report.skipped.len(), 2);

    let svc = VoyagerService::from_db(db);
    let planet = svc.get_exoplanet(id).await.unwrap();
    assert_eq!(planet.name, "Kepler-22b");
}

#[tokio::test]
async fn status_reports_all_applied_after_startup() {
    let dir = TempDir::new().unwrap();
    let svc = VoyagerService::new_local(&db_path(&dir)).await.unwrap();

    let status = svc.db().migration_status().await.unwrap();
    assert!(
        status
            .iter()
            .all(|(_, state)| *state == MigrationState::Applied),
        "{status:?}"
    );
    assert_eq!(svc.db().applied_migrations().await.unwrap().len(), 2);
}

#[tokio::test]
async fn concurrent_reads_share_small_pool() {
    let dir = TempDir::new().unwrap();
    let path = db_path(&dir);
    let pool = PoolConfig {
        max_open: 2,
        max_idle: 2,
        max_lifetime: None,
    };

    let db = VoyagerDb::open_local(&path, pool).await.unwrap();
    db.run_migrations().await.unwrap();
    let svc = Arc::new(VoyagerService::from_db(db));

    for i in 0..5 {
        svc.create_exoplanet(&rock(&format!("Rock {i}"), f64::from(i + 1) * 100.0))
            .await
            .unwrap();
    }

    let mut handles = Vec::new();
    for _ in 0..8 {
        let svc = Arc::clone(&svc);
        handles.push(tokio::spawn(async move {
            svc.list_exoplanets(&ExoplanetFilter::default())
                .await
                .unwrap()
                .len()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), 5);
    }

    assert_eq!(svc.db().pool().available(), 2);
    assert!(svc.db().pool().idle_count() <= 2);
}
