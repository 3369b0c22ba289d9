//! Activity domain entity.

/// A scheduled camp offering with a difficulty rating.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Activity {
    /// Unique activity identifier
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    id: i32,
    /// Activity name
    #[cfg_attr(feature = "openapi", schema(example = "Archery"))]
    name: String,
    /// Difficulty rating
    #[cfg_attr(feature = "openapi", schema(example = 2))]
    difficulty: i32,
}

impl Activity {
    /// Rebuild an activity from a stored row.
    pub fn from_parts(id: i32, name: String, difficulty: i32) -> Self {
        Self {
            id,
            name,
            difficulty,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn difficulty(&self) -> i32 {
        self.difficulty
    }
}

/// Activity that has not been stored yet. Activities carry no field rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    name: String,
    difficulty: i32,
}

impl NewActivity {
    pub fn new(name: impl Into<String>, difficulty: i32) -> Self {
        Self {
            name: name.into(),
            difficulty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn difficulty(&self) -> i32 {
        self.difficulty
    }
}
