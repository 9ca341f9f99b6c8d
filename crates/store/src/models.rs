//! Document shapes of the `movies` and `directors` collections.
//!
//! Stored documents carry the database-assigned `_id` plus an optional
//! client-supplied integer `id`, kept from the days when records lived in an
//! in-memory array and were looked up by that number.

use mongodb::bson::Bson;
use moviegraph_common_types::NativeId;
use serde::{Deserialize, Deserializer, Serialize};

pub const MOVIES_COLLECTION: &str = "movies";
pub const DIRECTORS_COLLECTION: &str = "directors";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: NativeId,
    #[serde(
        rename = "id",
        default,
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub legacy_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<i32>,
    /// Soft reference to [`Director::id`]. Never checked for existence, and
    /// anything that isn't a well-formed id reads back as `None`.
    #[serde(
        rename = "directorId",
        default,
        deserialize_with = "lenient_native_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub director_id: Option<NativeId>,
}

// Documents written by other clients may hold a number or a free-form string
// in `directorId`.
fn lenient_native_id<'de, D>(deserializer: D) -> Result<Option<NativeId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Bson>::deserialize(deserializer)? {
        Some(Bson::ObjectId(oid)) => Some(oid.into()),
        Some(Bson::String(s)) => NativeId::parse_lenient(Some(s.as_str())),
        _ => None,
    })
}

// Other clients may store whole numbers as doubles. Fractional, out of range
// and non-numeric values read as `None`.
fn lenient_int<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let n = match Option::<Bson>::deserialize(deserializer)? {
        Some(Bson::Int32(n)) => Some(i64::from(n)),
        Some(Bson::Int64(n)) => Some(n),
        Some(Bson::Double(n)) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => Some(n as i64),
        _ => None,
    };
    Ok(n.and_then(|n| T::try_from(n).ok()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    #[serde(rename = "_id")]
    pub id: NativeId,
    #[serde(
        rename = "id",
        default,
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub legacy_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub birth: Option<i32>,
}

/// A movie that hasn't been assigned a [`NativeId`] yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewMovie {
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<i64>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(rename = "directorId", skip_serializing_if = "Option::is_none")]
    pub director_id: Option<NativeId>,
}

impl NewMovie {
    pub fn with_id(self, id: NativeId) -> Movie {
        Movie {
            id,
            legacy_id: self.legacy_id,
            title: Some(self.title),
            description: self.description,
            year: self.year,
            director_id: self.director_id,
        }
    }
}

/// A director that hasn't been assigned a [`NativeId`] yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewDirector {
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth: Option<i32>,
}

impl NewDirector {
    pub fn with_id(self, id: NativeId) -> Director {
        Director {
            id,
            legacy_id: self.legacy_id,
            name: self.name,
            birth: self.birth,
        }
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{self, doc, oid::ObjectId};

    use super::*;

    #[test]
    fn movie_reads_stored_fields() {
        let id = ObjectId::new();
        let director_id = ObjectId::new();
        let movie: Movie = bson::from_document(doc! {
            "_id": id,
            "id": 3_i64,
            "title": "Jackie Brown",
            "year": 1997,
            "directorId": director_id,
        })
        .unwrap();

        assert_eq!(movie.id, NativeId::from(id));
        assert_eq!(movie.legacy_id, Some(3));
        assert_eq!(movie.title.as_deref(), Some("Jackie Brown"));
        assert_eq!(movie.description, None);
        assert_eq!(movie.year, Some(1997));
        assert_eq!(movie.director_id, Some(NativeId::from(director_id)));
    }

    #[test]
    fn malformed_director_id_reads_as_none() {
        for director_id in [Bson::Int32(1), Bson::String("nope".to_string()), Bson::Null] {
            let movie: Movie = bson::from_document(doc! {
                "_id": ObjectId::new(),
                "title": "Death Proof",
                "directorId": director_id,
            })
            .unwrap();
            assert_eq!(movie.director_id, None);
        }
    }

    #[test]
    fn director_id_stored_as_hex_string_is_accepted() {
        let director_id = ObjectId::new();
        let movie: Movie = bson::from_document(doc! {
            "_id": ObjectId::new(),
            "title": "Kill Bill",
            "directorId": director_id.to_hex(),
        })
        .unwrap();

        assert_eq!(movie.director_id, Some(NativeId::from(director_id)));
    }

    #[test]
    fn missing_title_reads_as_none() {
        let movie: Movie = bson::from_document(doc! { "_id": ObjectId::new() }).unwrap();

        assert_eq!(movie.title, None);
    }

    #[test]
    fn whole_doubles_read_as_integers() {
        let movie: Movie = bson::from_document(doc! {
            "_id": ObjectId::new(),
            "id": 7.0,
            "title": "Pulp Fiction",
            "year": 1994.0,
        })
        .unwrap();
        let director: Director = bson::from_document(doc! {
            "_id": ObjectId::new(),
            "birth": 1963_i64,
        })
        .unwrap();

        assert_eq!(movie.legacy_id, Some(7));
        assert_eq!(movie.year, Some(1994));
        assert_eq!(director.birth, Some(1963));
    }

    #[test]
    fn unusable_numbers_read_as_none() {
        for year in [
            Bson::Double(1994.5),
            Bson::Double(f64::NAN),
            Bson::Int64(i64::from(i32::MAX) + 1),
            Bson::String("1994".to_string()),
            Bson::Null,
        ] {
            let movie: Movie = bson::from_document(doc! {
                "_id": ObjectId::new(),
                "title": "Paris, Texas",
                "year": year,
            })
            .unwrap();
            assert_eq!(movie.year, None);
        }
    }

    #[test]
    fn new_movie_omits_absent_fields() {
        let document = bson::to_document(&NewMovie {
            title: "Reservoir Dogs".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(document, doc! { "title": "Reservoir Dogs" });
    }
}
