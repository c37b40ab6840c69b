//! Book entity for SeaORM. List fields are stored as JSONB arrays.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub isbn: String,
    pub title: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub authors: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub genres: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub publication_year: i32,
    pub price: i64,
    pub currency: String,
    pub sample_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn strings(value: Json) -> Vec<String> {
    serde_json::from_value(value).unwrap_or_default()
}

impl From<Model> for bookshop_core::domain::Book {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            isbn: model.isbn,
            title: model.title,
            authors: strings(model.authors),
            genres: strings(model.genres),
            tags: strings(model.tags),
            publication_year: model.publication_year,
            price: model.price,
            currency: model.currency,
            sample_url: model.sample_url,
        }
    }
}

impl From<bookshop_core::domain::Book> for ActiveModel {
    fn from(book: bookshop_core::domain::Book) -> Self {
        Self {
            id: Set(book.id),
            isbn: Set(book.isbn),
            title: Set(book.title),
            authors: Set(Json::from(book.authors)),
            genres: Set(Json::from(book.genres)),
            tags: Set(Json::from(book.tags)),
            publication_year: Set(book.publication_year),
            price: Set(book.price),
            currency: Set(book.currency),
            sample_url: Set(book.sample_url),
        }
    }
}
