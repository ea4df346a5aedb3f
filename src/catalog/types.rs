//! Catalog record types
//!
//! The on-disk catalog uses the field names of the original data export
//! (`genre`, `story`, `ageRating`); the clearer names are accepted as aliases.

use serde::{Deserialize, Deserializer, Serialize};

/// Maximum number of genre tags kept for display and grounding
pub const MAX_GENRES: usize = 3;

/// One recommendable webtoon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub title: String,
    pub author: String,
    pub link: String,
    pub thumbnail: String,
    #[serde(
        default,
        rename = "genre",
        alias = "genres",
        deserialize_with = "null_as_default"
    )]
    pub genres: Vec<String>,
    #[serde(
        default,
        rename = "story",
        alias = "description",
        deserialize_with = "null_as_default"
    )]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_rating: Option<String>,
}

impl CatalogEntry {
    /// Genre tags without embedded line breaks, capped at [`MAX_GENRES`]
    pub fn clean_genres(&self) -> impl Iterator<Item = &str> {
        self.genres
            .iter()
            .map(String::as_str)
            .filter(|g| !g.contains('\n'))
            .take(MAX_GENRES)
    }
}

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_original_field_names() {
        let json = r##"{
            "title": "여신강림",
            "author": "야옹이",
            "link": "https://comic.example.com/1",
            "thumbnail": "https://img.example.com/1.jpg",
            "genre": ["#로맨스", "#학원"],
            "story": "화장으로 인생이 바뀐 주경의 이야기",
            "ageRating": "12세 이용가"
        }"##;
        let entry: CatalogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.genres, vec!["#로맨스", "#학원"]);
        assert_eq!(entry.description, "화장으로 인생이 바뀐 주경의 이야기");
        assert_eq!(entry.age_rating.as_deref(), Some("12세 이용가"));
    }

    #[test]
    fn test_deserialize_alias_names() {
        let json = r#"{
            "title": "A", "author": "B", "link": "l", "thumbnail": "t",
            "genres": ["drama"], "description": "desc"
        }"#;
        let entry: CatalogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.genres, vec!["drama"]);
        assert_eq!(entry.description, "desc");
    }

    #[test]
    fn test_missing_and_null_optional_fields() {
        let json = r#"{"title": "A", "author": "B", "link": "l", "thumbnail": "t", "genre": null, "story": null}"#;
        let entry: CatalogEntry = serde_json::from_str(json).unwrap();
        assert!(entry.genres.is_empty());
        assert!(entry.description.is_empty());
        assert!(entry.age_rating.is_none());

        let json = r#"{"title": "A", "author": "B", "link": "l", "thumbnail": "t"}"#;
        let entry: CatalogEntry = serde_json::from_str(json).unwrap();
        assert!(entry.genres.is_empty());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let json = r#"{"author": "B", "link": "l", "thumbnail": "t"}"#;
        assert!(serde_json::from_str::<CatalogEntry>(json).is_err());
    }

    #[test]
    fn test_clean_genres() {
        let entry = CatalogEntry {
            title: "A".to_string(),
            author: "B".to_string(),
            link: "l".to_string(),
            thumbnail: "t".to_string(),
            genres: vec![
                "#판타지".to_string(),
                "연재\n요일".to_string(),
                "#액션".to_string(),
                "#무협".to_string(),
                "#개그".to_string(),
            ],
            description: String::new(),
            age_rating: None,
        };
        let genres: Vec<&str> = entry.clean_genres().collect();
        assert_eq!(genres, vec!["#판타지", "#액션", "#무협"]);
    }
}
