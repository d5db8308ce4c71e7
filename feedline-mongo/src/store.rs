use chrono::{DateTime, Utc};
use feedline_core::{BarCursor, BarQuery, DocumentStore, FeedError};
use mongodb::bson::{DateTime as BsonDateTime, Document, doc};
use mongodb::sync::{Collection, Database};

use crate::decode::decode_bar;

/// A MongoDB database holding bar collections.
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub(crate) const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Name of the underlying database.
    #[must_use]
    pub fn database_name(&self) -> &str {
        self.db.name()
    }
}

fn bson_time(ts: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(ts.timestamp_millis())
}

/// `code == q.code AND q.start <= trade_date <= q.finish`.
pub(crate) fn bar_filter(query: &BarQuery) -> Document {
    doc! {
        "code": query.code.as_str(),
        "trade_date": {
            "$gte": bson_time(query.start),
            "$lte": bson_time(query.finish),
        },
    }
}

/// Ascending by `trade_date`; consumers assume monotonic time.
pub(crate) fn bar_sort() -> Document {
    doc! { "trade_date": 1 }
}

impl DocumentStore for MongoStore {
    fn find_bars(&self, collection: &str, query: &BarQuery) -> Result<BarCursor, FeedError> {
        let coll: Collection<Document> = self.db.collection(collection);
        let cursor = coll
            .find(bar_filter(query))
            .sort(bar_sort())
            .run()
            .map_err(|e| FeedError::query(e.to_string()))?;
        Ok(Box::new(cursor.map(|next| {
            next.map_err(|e| FeedError::query(e.to_string()))
                .and_then(|d| decode_bar(&d))
        })))
    }
}
