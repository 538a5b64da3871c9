//! Book document model
//!
//! The collection is provisioned by an external seeding process; this program
//! only reads it and mutates single documents by title. Query results are
//! handled as raw BSON documents so projections and aggregation outputs print
//! as the server returns them. The typed [`Book`] is used where the full shape
//! matters.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A book as stored in the collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<ObjectId>,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub published_year: i32,
    pub price: f64,
    pub in_stock: bool,
}

impl Book {
    pub fn new(
        title: &str,
        author: &str,
        genre: &str,
        published_year: i32,
        price: f64,
        in_stock: bool,
    ) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.to_string(),
            published_year,
            price,
            in_stock,
        }
    }
}

/// `floor(year / 10) * 10`
pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

/// Label of the decade bucket a year falls into
pub fn decade_label(year: i32) -> String {
    format!("{}s", decade_of(year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn test_decade_of() {
        assert_eq!(decade_of(1950), 1950);
        assert_eq!(decade_of(1959), 1950);
        assert_eq!(decade_of(2003), 2000);
        assert_eq!(decade_of(1813), 1810);
    }

    #[test]
    fn test_decade_label() {
        assert_eq!(decade_label(1949), "1940s");
        assert_eq!(decade_label(2010), "2010s");
    }

    #[test]
    fn test_book_serializes_with_field_names() {
        let book = Book::new("The Hobbit", "J.R.R. Tolkien", "Fantasy", 1937, 14.99, true);
        let doc = bson::to_document(&book).unwrap();

        assert!(!doc.contains_key("_id"));
        assert_eq!(doc.get_str("title").unwrap(), "The Hobbit");
        assert_eq!(doc.get_str("author").unwrap(), "J.R.R. Tolkien");
        assert_eq!(doc.get_str("genre").unwrap(), "Fantasy");
        assert_eq!(doc.get_i32("published_year").unwrap(), 1937);
        assert_eq!(doc.get_f64("price").unwrap(), 14.99);
        assert!(doc.get_bool("in_stock").unwrap());
    }

    #[test]
    fn test_book_deserializes_with_id() {
        let oid = ObjectId::new();
        let doc = bson::doc! {
            "_id": oid,
            "title": "Moby Dick",
            "author": "Herman Melville",
            "genre": "Adventure",
            "published_year": 1851,
            "price": 12.5,
            "in_stock": false,
        };

        let book: Book = bson::from_document(doc).unwrap();
        assert_eq!(book.id, Some(oid));
        assert_eq!(book.title, "Moby Dick");
        assert!(!book.in_stock);
    }
}
