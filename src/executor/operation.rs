//! Operations the runner can send to the book collection
//!
//! Each operation knows how to render itself as the database command the
//! driver sends for it. The `plan` subcommand prints these, and `explain`
//! wraps the find command directly.

use mongodb::bson::{Bson, Document, doc};

/// A single request against the book collection
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Read documents matching a filter
    Find {
        filter: Document,
        options: FindOptions,
    },

    /// Update the first document matching a filter
    UpdateOne { filter: Document, update: Document },

    /// Delete the first document matching a filter
    DeleteOne { filter: Document },

    /// Run an aggregation pipeline
    Aggregate { pipeline: Vec<Document> },

    /// Ensure an index exists on the given keys
    CreateIndex { keys: Document },

    /// Return the query plan of a find without materializing documents
    Explain {
        verbosity: ExplainVerbosity,
        filter: Document,
        options: FindOptions,
    },
}

/// Options for find operations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    pub projection: Option<Document>,
    pub sort: Option<Document>,
    pub skip: Option<u64>,
    pub limit: Option<i64>,
}

/// Verbosity of an explain command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ExplainVerbosity {
    /// Winning plan only
    #[default]
    #[value(name = "queryPlanner")]
    QueryPlanner,

    /// Winning plan plus execution statistics
    #[value(name = "executionStats")]
    ExecutionStats,

    /// Statistics for every candidate plan
    #[value(name = "allPlansExecution")]
    AllPlansExecution,
}

impl ExplainVerbosity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExplainVerbosity::QueryPlanner => "queryPlanner",
            ExplainVerbosity::ExecutionStats => "executionStats",
            ExplainVerbosity::AllPlansExecution => "allPlansExecution",
        }
    }
}

impl FindOptions {
    pub fn projection(mut self, projection: Document) -> Self {
        self.projection = Some(projection);
        self
    }

    pub fn sort(mut self, sort: Document) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn page(mut self, skip: u64, limit: i64) -> Self {
        self.skip = Some(skip);
        self.limit = Some(limit);
        self
    }

    /// Convert to driver options
    pub fn to_driver_options(&self) -> mongodb::options::FindOptions {
        let mut options = mongodb::options::FindOptions::default();
        options.projection = self.projection.clone();
        options.sort = self.sort.clone();
        options.skip = self.skip;
        options.limit = self.limit;
        options
    }
}

impl Operation {
    /// Short name of the operation kind
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Find { .. } => "find",
            Operation::UpdateOne { .. } => "updateOne",
            Operation::DeleteOne { .. } => "deleteOne",
            Operation::Aggregate { .. } => "aggregate",
            Operation::CreateIndex { .. } => "createIndex",
            Operation::Explain { .. } => "explain",
        }
    }

    /// Render the operation as the command document sent to the server
    pub fn to_command(&self, collection: &str) -> Document {
        match self {
            Operation::Find { filter, options } => find_command(collection, filter, options),
            Operation::UpdateOne { filter, update } => doc! {
                "update": collection,
                "updates": [{ "q": filter.clone(), "u": update.clone(), "multi": false }],
            },
            Operation::DeleteOne { filter } => doc! {
                "delete": collection,
                "deletes": [{ "q": filter.clone(), "limit": 1 }],
            },
            Operation::Aggregate { pipeline } => doc! {
                "aggregate": collection,
                "pipeline": pipeline.clone(),
                "cursor": {},
            },
            Operation::CreateIndex { keys } => doc! {
                "createIndexes": collection,
                "indexes": [{ "key": keys.clone(), "name": index_name(keys) }],
            },
            Operation::Explain {
                verbosity,
                filter,
                options,
            } => explain_command(collection, filter, options, *verbosity),
        }
    }
}

/// Build a `find` command document
pub fn find_command(collection: &str, filter: &Document, options: &FindOptions) -> Document {
    let mut cmd = doc! {
        "find": collection,
        "filter": filter.clone(),
    };

    if let Some(projection) = &options.projection {
        cmd.insert("projection", projection.clone());
    }
    if let Some(sort) = &options.sort {
        cmd.insert("sort", sort.clone());
    }
    if let Some(skip) = options.skip {
        // skip beyond i64::MAX is not representable in BSON
        cmd.insert("skip", i64::try_from(skip).unwrap_or(i64::MAX));
    }
    if let Some(limit) = options.limit {
        cmd.insert("limit", limit);
    }

    cmd
}

/// Build an `explain` command wrapping a find
pub fn explain_command(
    collection: &str,
    filter: &Document,
    options: &FindOptions,
    verbosity: ExplainVerbosity,
) -> Document {
    doc! {
        "explain": find_command(collection, filter, options),
        "verbosity": verbosity.as_str(),
    }
}

/// Default index name the server derives from a key pattern,
/// e.g. `{author: 1, published_year: 1}` -> `author_1_published_year_1`
pub fn index_name(keys: &Document) -> String {
    keys.iter()
        .map(|(field, direction)| {
            let direction = match direction {
                Bson::Int32(n) => n.to_string(),
                Bson::Int64(n) => n.to_string(),
                Bson::Double(f) => f.to_string(),
                Bson::String(s) => s.clone(),
                other => other.to_string(),
            };
            format!("{}_{}", field, direction)
        })
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_name_preserves_field_order() {
        assert_eq!(index_name(&doc! { "title": 1 }), "title_1");
        assert_eq!(
            index_name(&doc! { "author": 1, "published_year": 1 }),
            "author_1_published_year_1"
        );
        assert_eq!(index_name(&doc! { "price": -1 }), "price_-1");
    }

    #[test]
    fn test_find_command_includes_only_set_options() {
        let cmd = find_command("books", &doc! { "genre": "Fiction" }, &FindOptions::default());
        assert_eq!(cmd, doc! { "find": "books", "filter": { "genre": "Fiction" } });

        let options = FindOptions::default().sort(doc! { "price": 1 }).page(5, 5);
        let cmd = find_command("books", &doc! {}, &options);
        assert_eq!(cmd.get_document("sort").unwrap(), &doc! { "price": 1 });
        assert_eq!(cmd.get_i64("skip").unwrap(), 5);
        assert_eq!(cmd.get_i64("limit").unwrap(), 5);
        assert!(!cmd.contains_key("projection"));
    }

    #[test]
    fn test_explain_command_wraps_find() {
        let cmd = explain_command(
            "books",
            &doc! { "author": "George Orwell" },
            &FindOptions::default(),
            ExplainVerbosity::QueryPlanner,
        );
        assert_eq!(cmd.get_str("verbosity").unwrap(), "queryPlanner");
        let find = cmd.get_document("explain").unwrap();
        assert_eq!(find.get_str("find").unwrap(), "books");
        assert_eq!(
            find.get_document("filter").unwrap(),
            &doc! { "author": "George Orwell" }
        );
    }

    #[test]
    fn test_write_commands_touch_one_document() {
        let update = Operation::UpdateOne {
            filter: doc! { "title": "The Hobbit" },
            update: doc! { "$set": { "price": 16.99 } },
        }
        .to_command("books");
        let updates = update.get_array("updates").unwrap();
        let first = updates[0].as_document().unwrap();
        assert!(!first.get_bool("multi").unwrap());

        let delete = Operation::DeleteOne {
            filter: doc! { "title": "Moby Dick" },
        }
        .to_command("books");
        let deletes = delete.get_array("deletes").unwrap();
        assert_eq!(deletes[0].as_document().unwrap().get_i32("limit").unwrap(), 1);
    }

    #[test]
    fn test_driver_options_conversion() {
        let options = FindOptions::default()
            .projection(doc! { "title": 1, "_id": 0 })
            .page(0, 5)
            .to_driver_options();
        assert_eq!(options.projection, Some(doc! { "title": 1, "_id": 0 }));
        assert_eq!(options.skip, Some(0));
        assert_eq!(options.limit, Some(5));
        assert_eq!(options.sort, None);
    }

    #[test]
    fn test_explain_verbosity_names() {
        use clap::ValueEnum;
        let parsed = ExplainVerbosity::from_str("executionStats", false).unwrap();
        assert_eq!(parsed, ExplainVerbosity::ExecutionStats);
        assert_eq!(ExplainVerbosity::default().as_str(), "queryPlanner");
    }
}
