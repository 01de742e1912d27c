use async_trait::async_trait;
use bson::{Document, doc};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    Client, Collection, Database,
    options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument},
};

use crate::{
    models::{DbUlid, DbUser},
    storage::{SortOrder, Storage, StoreError, UserPage, UserPatch, UserStore},
};

#[derive(Debug)]
pub struct MongoDbStorage(Client);

pub const MONGODB_COLLECTION_USERS: &str = "users";

impl MongoDbStorage {
    pub async fn new(uri: &str) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(uri).await?;
        Ok(Self(client))
    }

    fn get_db(&self) -> Database {
        self.0
            .default_database()
            .unwrap_or_else(|| self.0.database("quill"))
    }

    fn users(&self) -> Collection<DbUser> {
        self.get_db().collection::<DbUser>(MONGODB_COLLECTION_USERS)
    }
}

#[async_trait]
impl UserStore for MongoDbStorage {
    async fn get(&self, id: &DbUlid) -> Result<Option<DbUser>, StoreError> {
        self.users()
            .find_one(doc! { "_id": id.clone() })
            .await
            .map_err(StoreError::MongoDB)
    }

    async fn update(&self, id: &DbUlid, patch: UserPatch) -> Result<Option<DbUser>, StoreError> {
        // MongoDB rejects an empty $set, so an empty patch degenerates to
        // a plain read.
        if patch.is_empty() {
            return self.get(id).await;
        }

        let mut set = Document::new();
        if let Some(username) = patch.username {
            set.insert("username", username);
        }
        if let Some(email) = patch.email {
            set.insert("email", email);
        }
        if let Some(profile_picture) = patch.profile_picture {
            set.insert("profile_picture", profile_picture);
        }
        if let Some(password_hash) = patch.password_hash {
            set.insert("password_hash", password_hash);
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.users()
            .find_one_and_update(doc! { "_id": id.clone() }, doc! { "$set": set })
            .with_options(options)
            .await
            .map_err(StoreError::MongoDB)
    }

    async fn delete(&self, id: &DbUlid) -> Result<(), StoreError> {
        self.users().delete_one(doc! { "_id": id.clone() }).await?;
        Ok(())
    }

    async fn list(&self, page: UserPage) -> Result<Vec<DbUser>, StoreError> {
        let direction = match page.sort {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        };

        let find_options = FindOptions::builder()
            .sort(doc! { "created_at": direction })
            .skip(page.skip)
            .limit(page.limit)
            .build();

        self.users()
            .find(doc! {})
            .with_options(find_options)
            .await?
            .try_collect()
            .await
            .map_err(StoreError::MongoDB)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.users()
            .count_documents(doc! {})
            .await
            .map_err(StoreError::MongoDB)
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<u64, StoreError> {
        let since = bson::DateTime::from_chrono(since);
        self.users()
            .count_documents(doc! { "created_at": { "$gte": since } })
            .await
            .map_err(StoreError::MongoDB)
    }
}

#[async_trait]
impl Storage for MongoDbStorage {
    async fn ping(&self) -> Result<(), StoreError> {
        self.get_db().run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
