//! Exoplanet repository: CRUD, filtered listing and fuel estimation.
//!
//! Every write validates first and stores the derived gravity alongside the
//! entity fields. Updates replace every column except `id`.

use voyager_core::entities::Exoplanet;

use crate::error::DatabaseError;
use crate::helpers::parse_enum;
use crate::query::{ExoplanetFilter, SELECT_COLS};
use crate::service::VoyagerService;

fn row_to_exoplanet(row: &libsql::Row) -> Result<Exoplanet, DatabaseError> {
    Ok(Exoplanet {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get::<Option<String>>(2)?.unwrap_or_default(),
        distance: row.get::<Option<f64>>(3)?.unwrap_or_default(),
        radius: row.get::<Option<f64>>(4)?.unwrap_or_default(),
        mass: row.get::<Option<f64>>(5)?.unwrap_or_default(),
        kind: parse_enum(&row.get::<String>(6)?)?,
    })
}

impl VoyagerService {
    /// Validate and insert a new exoplanet. Any `id` on the input is ignored.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` if validation fails, or a libSQL error
    /// if the INSERT fails.
    pub async fn create_exoplanet(&self, planet: &Exoplanet) -> Result<Exoplanet, DatabaseError> {
        planet.validate()?;
        let gravity = planet.gravity()?;

        let conn = self.db().acquire().await?;
        conn.execute(
            "INSERT INTO exoplanets (name, description, distance, radius, mass, type, gravity)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            libsql::params![
                planet.name.as_str(),
                planet.description.as_str(),
                planet.distance,
                planet.radius,
                planet.mass,
                planet.kind.as_str(),
                gravity
            ],
        )
        .await?;
        let id = conn.last_insert_rowid();

        tracing::debug!(id, kind = %planet.kind, "exoplanet created");
        Ok(planet.clone().with_id(id))
    }

    /// Fetch an exoplanet by identity.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no row has this `id`.
    pub async fn get_exoplanet(&self, id: i64) -> Result<Exoplanet, DatabaseError> {
        let conn = self.db().acquire().await?;
        let mut rows = conn
            .query(&format!("SELECT {SELECT_COLS} FROM exoplanets WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound(id))?;
        row_to_exoplanet(&row)
    }

    /// List exoplanets matching `filter`, in the filter's sort order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be decoded.
    pub async fn list_exoplanets(
        &self,
        filter: &ExoplanetFilter,
    ) -> Result<Vec<Exoplanet>, DatabaseError> {
        let query = filter.to_query();
        let conn = self.db().acquire().await?;
        let mut rows = conn
            .query(&query.sql, libsql::params_from_iter(query.params))
            .await?;

        let mut planets = Vec::new();
        while let Some(row) = rows.next().await? {
            planets.push(row_to_exoplanet(&row)?);
        }
        Ok(planets)
    }

    /// Replace every field of an existing exoplanet except its identity.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` if validation fails, or
    /// `DatabaseError::NotFound` if no row has this `id`.
    pub async fn update_exoplanet(
        &self,
        id: i64,
        planet: &Exoplanet,
    ) -> Result<Exoplanet, DatabaseError> {
        planet.validate()?;
        let gravity = planet.gravity()?;

        let conn = self.db().acquire().await?;
        let affected = conn
            .execute(
                "UPDATE exoplanets
                 SET name = ?1, description = ?2, distance = ?3, radius = ?4,
                     mass = ?5, type = ?6, gravity = ?7
                 WHERE id = ?8",
                libsql::params![
                    planet.name.as_str(),
                    planet.description.as_str(),
                    planet.distance,
                    planet.radius,
                    planet.mass,
                    planet.kind.as_str(),
                    gravity,
                    id
                ],
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NotFound(id));
        }

        Ok(planet.clone().with_id(id))
    }

    /// Delete an exoplanet by identity.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no row has this `id`.
    pub async fn delete_exoplanet(&self, id: i64) -> Result<(), DatabaseError> {
        let conn = self.db().acquire().await?;
        let affected = conn
            .execute("DELETE FROM exoplanets WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NotFound(id));
        }
        tracing::debug!(id, "exoplanet deleted");
        Ok(())
    }

    /// Fuel needed to reach exoplanet `id` with `crew_capacity` crew.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no row has this `id`, or
    /// `DatabaseError::Core` if `crew_capacity <= 0`.
    pub async fn estimate_fuel(&self, id: i64, crew_capacity: i64) -> Result<f64, DatabaseError> {
        let planet = self.get_exoplanet(id).await?;
        Ok(planet.estimate_fuel(crew_capacity)?)
    }
}
