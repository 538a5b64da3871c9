//! The fixed sequence of operations run against the book collection
//!
//! Steps run strictly in order. No step consumes the output of another,
//! but later reads do observe the earlier price update and deletion.

use mongodb::bson::{Document, doc};

use super::operation::{ExplainVerbosity, FindOptions, Operation};

pub const FICTION_GENRE: &str = "Fiction";
pub const ORWELL: &str = "George Orwell";
pub const PUBLISHED_AFTER: i32 = 1950;
pub const RECENT_AFTER: i32 = 2010;
pub const REPRICED_TITLE: &str = "The Hobbit";
pub const NEW_PRICE: f64 = 16.99;
pub const DELETED_TITLE: &str = "Moby Dick";
pub const PAGE_SIZE: i64 = 5;

/// One labelled operation of the plan
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Header printed above the step's result
    pub label: String,
    pub operation: Operation,
}

impl Step {
    fn new(label: impl Into<String>, operation: Operation) -> Self {
        Self {
            label: label.into(),
            operation,
        }
    }
}

/// Build the full plan
///
/// Pagination is two steps, one per page.
pub fn book_plan(verbosity: ExplainVerbosity) -> Vec<Step> {
    vec![
        // Basic CRUD
        Step::new(
            "Fiction books",
            find(doc! { "genre": FICTION_GENRE }),
        ),
        Step::new(
            format!("Books published after {}", PUBLISHED_AFTER),
            find(doc! { "published_year": { "$gt": PUBLISHED_AFTER } }),
        ),
        Step::new(format!("Books by {}", ORWELL), find(author_filter())),
        Step::new(
            format!("Price of \"{}\" updated", REPRICED_TITLE),
            Operation::UpdateOne {
                filter: doc! { "title": REPRICED_TITLE },
                update: doc! { "$set": { "price": NEW_PRICE } },
            },
        ),
        Step::new(
            format!("\"{}\" deleted", DELETED_TITLE),
            Operation::DeleteOne {
                filter: doc! { "title": DELETED_TITLE },
            },
        ),
        // Advanced queries
        Step::new(
            format!("Books in stock and published after {}", RECENT_AFTER),
            find(doc! {
                "in_stock": true,
                "published_year": { "$gt": RECENT_AFTER },
            }),
        ),
        Step::new(
            "Books with projection (title, author, price)",
            Operation::Find {
                filter: doc! {},
                options: FindOptions::default().projection(doc! {
                    "title": 1,
                    "author": 1,
                    "price": 1,
                    "_id": 0,
                }),
            },
        ),
        Step::new(
            "Books sorted by price (asc)",
            sorted_by_price(1),
        ),
        Step::new(
            "Books sorted by price (desc)",
            sorted_by_price(-1),
        ),
        Step::new(format!("Page 1 ({} books)", PAGE_SIZE), page(0)),
        Step::new(format!("Page 2 ({} books)", PAGE_SIZE), page(1)),
        // Aggregation
        Step::new(
            "Average price by genre",
            Operation::Aggregate {
                pipeline: average_price_by_genre(),
            },
        ),
        Step::new(
            "Author with the most books",
            Operation::Aggregate {
                pipeline: top_author(),
            },
        ),
        Step::new(
            "Books grouped by decade",
            Operation::Aggregate {
                pipeline: books_by_decade(),
            },
        ),
        // Indexing
        Step::new(
            "Index created on \"title\"",
            Operation::CreateIndex {
                keys: doc! { "title": 1 },
            },
        ),
        Step::new(
            "Compound index created on \"author\" and \"published_year\"",
            Operation::CreateIndex {
                keys: doc! { "author": 1, "published_year": 1 },
            },
        ),
        Step::new(
            format!("Explain result for query by author \"{}\"", ORWELL),
            Operation::Explain {
                verbosity,
                filter: author_filter(),
                options: FindOptions::default(),
            },
        ),
    ]
}

fn find(filter: Document) -> Operation {
    Operation::Find {
        filter,
        options: FindOptions::default(),
    }
}

fn author_filter() -> Document {
    doc! { "author": ORWELL }
}

fn sorted_by_price(direction: i32) -> Operation {
    Operation::Find {
        filter: doc! {},
        options: FindOptions::default().sort(doc! { "price": direction }),
    }
}

/// Zero-based page of the unsorted collection
fn page(index: u64) -> Operation {
    Operation::Find {
        filter: doc! {},
        options: FindOptions::default().page(index * PAGE_SIZE as u64, PAGE_SIZE),
    }
}

/// Mean price per genre
pub fn average_price_by_genre() -> Vec<Document> {
    vec![doc! {
        "$group": {
            "_id": field_ref("genre"),
            "avgPrice": { "$avg": field_ref("price") },
        }
    }]
}

/// Author with the highest document count; ties resolve in server order
pub fn top_author() -> Vec<Document> {
    vec![
        doc! {
            "$group": {
                "_id": field_ref("author"),
                "count": { "$sum": 1 },
            }
        },
        doc! { "$sort": { "count": -1 } },
        doc! { "$limit": 1 },
    ]
}

/// Document count per decade label, ascending by label
pub fn books_by_decade() -> Vec<Document> {
    vec![
        doc! {
            "$group": {
                "_id": decade_label_expression(),
                "count": { "$sum": 1 },
            }
        },
        doc! { "$sort": { "_id": 1 } },
    ]
}

/// `concat(toString(year - year mod 10), "s")`
pub fn decade_label_expression() -> Document {
    let year = field_ref("published_year");
    doc! {
        "$concat": [
            { "$toString": { "$subtract": [year.clone(), { "$mod": [year, 10] }] } },
            "s",
        ]
    }
}

fn field_ref(field: &str) -> String {
    format!("${}", field)
}
