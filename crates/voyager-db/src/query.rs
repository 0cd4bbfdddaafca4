//! List-query construction for exoplanets.
//!
//! Filters combine with AND; omitted filters impose no constraint. Filter
//! values are always bound as parameters, never spliced into the SQL text.
//! Only the ORDER BY column is interpolated, and it comes from a closed set.
//!
//! Distance bounds that fail to parse as a finite number are dropped rather
//! than rejected, so `?min_distance=abc` lists as if no lower bound was given.
//! A key given more than once keeps its first value.

/// Columns read by every exoplanet SELECT, in `row_to_exoplanet` order.
pub const SELECT_COLS: &str = "id, name, description, distance, radius, mass, type";

/// Raw list parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub kind: Option<String>,
    pub min_distance: Option<String>,
    pub max_distance: Option<String>,
    pub sort: Option<String>,
}

impl ListParams {
    /// Collect known keys from decoded query-string pairs.
    ///
    /// The first occurrence of a key wins; unknown keys are ignored.
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "type" => &mut params.kind,
                "min_distance" => &mut params.min_distance,
                "max_distance" => &mut params.max_distance,
                "sort" => &mut params.sort,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }
}

/// Ordering for list results. Anything unrecognized sorts by identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Id,
    Name,
    Distance,
    Radius,
    Type,
}

impl SortKey {
    /// Resolve a user-supplied sort key, falling back to [`SortKey::Id`].
    #[must_use]
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw {
            Some("name") => Self::Name,
            Some("distance") => Self::Distance,
            Some("radius") => Self::Radius,
            Some("type") => Self::Type,
            _ => Self::Id,
        }
    }

    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Distance => "distance",
            Self::Radius => "radius",
            Self::Type => "type",
        }
    }
}

/// Parsed filter and sort criteria for exoplanet listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExoplanetFilter {
    /// Exact match on the stored type tag. Unknown tags simply match nothing.
    pub kind: Option<String>,
    pub min_distance: Option<f64>,
    pub max_distance: Option<f64>,
    pub sort: SortKey,
}

/// A parameterized SELECT and its positional arguments.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub sql: String,
    pub params: Vec<libsql::Value>,
}

impl ExoplanetFilter {
    /// Build a filter from raw query-string values.
    ///
    /// Empty strings count as absent. Unparsable or non-finite distance
    /// bounds are dropped.
    #[must_use]
    pub fn from_params(params: &ListParams) -> Self {
        Self {
            kind: params
                .kind
                .as_deref()
                .filter(|kind| !kind.is_empty())
                .map(String::from),
            min_distance: parse_bound("min_distance", params.min_distance.as_deref()),
            max_distance: parse_bound("max_distance", params.max_distance.as_deref()),
            sort: SortKey::parse_lenient(params.sort.as_deref()),
        }
    }

    /// Render the filter as a parameterized SELECT.
    #[must_use]
    pub fn to_query(&self) -> ListQuery {
        let mut sql = format!("SELECT {SELECT_COLS} FROM exoplanets WHERE 1=1");
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref kind) = self.kind {
            params.push(libsql::Value::Text(kind.clone()));
            sql.push_str(&format!(" AND type = ?{}", params.len()));
        }
        if let Some(min) = self.min_distance {
            params.push(libsql::Value::Real(min));
            sql.push_str(&format!(" AND distance >= ?{}", params.len()));
        }
        if let Some(max) = self.max_distance {
            params.push(libsql::Value::Real(max));
            sql.push_str(&format!(" AND distance <= ?{}", params.len()));
        }

        sql.push_str(" ORDER BY ");
        sql.push_str(self.sort.column());

        ListQuery { sql, params }
    }
}

fn parse_bound(field: &'static str, raw: Option<&str>) -> Option<f64> {
    let raw = raw.filter(|value| !value.is_empty())?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            tracing::debug!(field, value = raw, "ignoring unparsable distance filter");
            None
        }
    }
}
